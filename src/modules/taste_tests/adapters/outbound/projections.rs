use crate::modules::taste_tests::core::record::TasteTestRecord;
use async_trait::async_trait;

#[async_trait]
pub trait TasteTestProjectionRepository: Send + Sync {
    async fn upsert(&self, record: TasteTestRecord, last_event_id: &str) -> anyhow::Result<()>;
}

#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()>;
}
