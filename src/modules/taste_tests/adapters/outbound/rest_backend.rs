// Read and write access to a hosted PostgREST style backend.
//
// Rows cross the row mapping boundary before they reach the pipeline. Every request carries
// the client wide timeout.

use crate::modules::taste_tests::adapters::outbound::projections::TasteTestProjectionRepository;
use crate::modules::taste_tests::adapters::outbound::row_mapping::{
    TasteTestRow, parse_rows, parse_taxonomy,
};
use crate::modules::taste_tests::core::record::TasteTestRecord;
use crate::modules::taste_tests::core::taxonomy::Taxonomy;
use crate::modules::taste_tests::use_cases::browse_results::queries_port::TasteTestQueries;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const RESULTS_TABLE: &str = "taste_test_results";
const PROPERTIES_TABLE: &str = "properties";
const FLAVORS_TABLE: &str = "flavors";

pub struct RestTasteTests {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestTasteTests {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build backend client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn select(&self, table: &str, query: &[(&str, String)]) -> anyhow::Result<Vec<Value>> {
        debug!(table, ?query, "backend select");
        let request = self.client.get(self.table_url(table)).query(query);
        self.authorized(request)
            .send()
            .await
            .with_context(|| format!("request to {table} failed"))?
            .error_for_status()
            .with_context(|| format!("backend rejected select on {table}"))?
            .json::<Vec<Value>>()
            .await
            .with_context(|| format!("unreadable response from {table}"))
    }
}

#[async_trait]
impl TasteTestQueries for RestTasteTests {
    async fn list_all(&self) -> anyhow::Result<Vec<TasteTestRecord>> {
        let rows = self
            .select(RESULTS_TABLE, &[("select", "*".to_string())])
            .await?;
        Ok(parse_rows(rows))
    }

    async fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<TasteTestRecord>> {
        let rows = self
            .select(
                RESULTS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{user_id}")),
                ],
            )
            .await?;
        Ok(parse_rows(rows))
    }

    async fn property_taxonomy(&self) -> anyhow::Result<Taxonomy> {
        let rows = self
            .select(PROPERTIES_TABLE, &[("select", "key,name".to_string())])
            .await?;
        Ok(parse_taxonomy(rows))
    }

    async fn flavor_taxonomy(&self) -> anyhow::Result<Taxonomy> {
        let rows = self
            .select(FLAVORS_TABLE, &[("select", "key,name".to_string())])
            .await?;
        Ok(parse_taxonomy(rows))
    }
}

#[async_trait]
impl TasteTestProjectionRepository for RestTasteTests {
    async fn upsert(&self, record: TasteTestRecord, last_event_id: &str) -> anyhow::Result<()> {
        let row = TasteTestRow::from(&record);
        let request = self
            .client
            .post(self.table_url(RESULTS_TABLE))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row]);
        self.authorized(request)
            .send()
            .await
            .context("upsert request failed")?
            .error_for_status()
            .context("backend rejected upsert")?;
        debug!(test_id = %record.test_id, last_event_id, "taste test upserted");
        Ok(())
    }
}
