use crate::modules::taste_tests::adapters::outbound::projections::TasteTestProjectionRepository;
use crate::modules::taste_tests::core::record::TasteTestRecord;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects the first upsert, then delegates.
pub struct FailingOnce {
    inner: Arc<dyn TasteTestProjectionRepository>,
    failed: AtomicBool,
}

impl FailingOnce {
    pub fn new(inner: Arc<dyn TasteTestProjectionRepository>) -> Self {
        Self {
            inner,
            failed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl TasteTestProjectionRepository for FailingOnce {
    async fn upsert(&self, record: TasteTestRecord, last_event_id: &str) -> anyhow::Result<()> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            anyhow::bail!("transient upsert failure");
        }
        self.inner.upsert(record, last_event_id).await
    }
}
