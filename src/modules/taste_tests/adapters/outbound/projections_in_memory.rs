// In memory read store for taste tests.
//
// Purpose
// - Serve the results pipeline and the projector without a hosted backend.
//
// Responsibilities
// - Store records keyed by test id together with the event that last wrote them.
// - Track the last processed event per projector.
// - Hold the property and flavor taxonomies.

use crate::modules::taste_tests::adapters::outbound::projections::{
    TasteTestProjectionRepository, WatermarkRepository,
};
use crate::modules::taste_tests::core::record::TasteTestRecord;
use crate::modules::taste_tests::core::taxonomy::Taxonomy;
use crate::modules::taste_tests::use_cases::browse_results::queries_port::TasteTestQueries;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct StoredTasteTest {
    record: TasteTestRecord,
    last_event_id: Option<String>,
}

#[derive(Default)]
pub struct InMemoryTasteTests {
    rows: RwLock<HashMap<String, StoredTasteTest>>,
    watermark: RwLock<HashMap<String, String>>,
    properties: Taxonomy,
    flavors: Taxonomy,
    is_offline: bool,
}

impl InMemoryTasteTests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxonomies(mut self, properties: Taxonomy, flavors: Taxonomy) -> Self {
        self.properties = properties;
        self.flavors = flavors;
        self
    }

    /// Adds records to the store, replacing any with the same test id.
    pub fn with_records(mut self, records: impl IntoIterator<Item = TasteTestRecord>) -> Self {
        let rows = self.rows.get_mut();
        for record in records {
            rows.insert(
                record.test_id.clone(),
                StoredTasteTest {
                    record,
                    last_event_id: None,
                },
            );
        }
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn last_event_id(&self, test_id: &str) -> Option<String> {
        self.rows
            .read()
            .await
            .get(test_id)
            .and_then(|stored| stored.last_event_id.clone())
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("Taste test store offline");
        }
        Ok(())
    }

    async fn select(&self, keep: impl Fn(&TasteTestRecord) -> bool) -> Vec<TasteTestRecord> {
        let guard = self.rows.read().await;
        let mut records: Vec<TasteTestRecord> = guard
            .values()
            .filter(|stored| keep(&stored.record))
            .map(|stored| stored.record.clone())
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.test_id.cmp(&b.test_id))
        });
        records
    }
}

#[async_trait::async_trait]
impl TasteTestProjectionRepository for InMemoryTasteTests {
    async fn upsert(&self, record: TasteTestRecord, last_event_id: &str) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        guard.insert(
            record.test_id.clone(),
            StoredTasteTest {
                record,
                last_event_id: Some(last_event_id.to_string()),
            },
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatermarkRepository for InMemoryTasteTests {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }
        Ok(self.watermark.read().await.get(name).cloned())
    }

    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }
        self.watermark
            .write()
            .await
            .insert(name.to_string(), last.to_string());
        Ok(())
    }
}

#[async_trait::async_trait]
impl TasteTestQueries for InMemoryTasteTests {
    async fn list_all(&self) -> anyhow::Result<Vec<TasteTestRecord>> {
        self.ensure_online()?;
        Ok(self.select(|_| true).await)
    }

    async fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<TasteTestRecord>> {
        self.ensure_online()?;
        Ok(self.select(|record| record.user_id == user_id).await)
    }

    async fn property_taxonomy(&self) -> anyhow::Result<Taxonomy> {
        self.ensure_online()?;
        Ok(self.properties.clone())
    }

    async fn flavor_taxonomy(&self) -> anyhow::Result<Taxonomy> {
        self.ensure_online()?;
        Ok(self.flavors.clone())
    }
}
