use crate::modules::taste_tests::adapters::outbound::projections::{
    TasteTestProjectionRepository, WatermarkRepository,
};
use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::projections::{Mutation, apply};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Projector {
    pub name: String,
    pub repository: Arc<dyn TasteTestProjectionRepository>,
    pub watermark_repository: Arc<dyn WatermarkRepository>,
}

impl Projector {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn TasteTestProjectionRepository>,
        watermark: Arc<dyn WatermarkRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            repository,
            watermark_repository: watermark,
        }
    }

    pub async fn apply_one(
        &self,
        stream_id: &str,
        version: i64,
        event: &TasteTestEvent,
    ) -> anyhow::Result<()> {
        for mutation in apply(stream_id, version, event) {
            match mutation {
                Mutation::Upsert {
                    record,
                    last_event_id,
                } => self.repository.upsert(record, &last_event_id).await?,
            }
        }
        self.watermark_repository
            .set(&self.name, &format!("{stream_id}:{version}"))
            .await?;
        debug!(projector = %self.name, stream_id, version, "projected event");
        Ok(())
    }
}
