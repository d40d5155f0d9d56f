use crate::shared::infrastructure::event_store::{
    EventStore, EventStoreError, EventStream, StreamVersion,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub struct InMemoryEventStore<Event: Clone + Send + Sync + 'static> {
    streams: RwLock<HashMap<String, Vec<Event>>>,
    delay_append_ms: AtomicU64,
    is_offline: bool,
}

impl<Event: Clone + Send + Sync + 'static> Default for InMemoryEventStore<Event> {
    fn default() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            delay_append_ms: AtomicU64::new(0),
            is_offline: false,
        }
    }
}

impl<Event: Clone + Send + Sync + 'static> InMemoryEventStore<Event> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Holds every append for `ms` before the version check, so tests can race two writers.
    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::Relaxed);
    }

    pub async fn stream_count(&self) -> usize {
        self.streams.read().await.len()
    }

    fn ensure_online(&self) -> Result<(), EventStoreError> {
        if self.is_offline {
            return Err(EventStoreError::Unavailable("taste test streams offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<Event> EventStore<Event> for InMemoryEventStore<Event>
where
    Event: Clone + Send + Sync + 'static,
{
    async fn load(&self, stream_id: &str) -> Result<EventStream<Event>, EventStoreError> {
        self.ensure_online()?;
        let guard = self.streams.read().await;
        let events = guard.get(stream_id).cloned().unwrap_or_default();
        Ok(EventStream::from_events(events))
    }

    async fn append(
        &self,
        stream_id: &str,
        expected_version: StreamVersion,
        events: &[Event],
    ) -> Result<StreamVersion, EventStoreError> {
        self.ensure_online()?;

        let delay = self.delay_append_ms.load(Ordering::Relaxed);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let mut guard = self.streams.write().await;
        let stream = guard.entry(stream_id.to_string()).or_default();
        let actual = stream.len() as StreamVersion;
        if actual != expected_version {
            return Err(EventStoreError::Conflict {
                stream_id: stream_id.to_string(),
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);
        Ok(stream.len() as StreamVersion)
    }
}
