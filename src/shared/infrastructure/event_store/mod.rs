// Append-only event streams with optimistic concurrency.
//
// One stream per taste test ("TasteTest-<test id>"). A stream's version is the number of events
// it holds; an append names the version it was decided against and is refused with `Conflict`
// when another writer got there first.

use async_trait::async_trait;
use thiserror::Error;

pub type StreamVersion = i64;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("stream {stream_id} is at version {actual}, append expected {expected}")]
    Conflict {
        stream_id: String,
        expected: StreamVersion,
        actual: StreamVersion,
    },

    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventStream<E> {
    pub events: Vec<E>,
    pub version: StreamVersion,
}

impl<E> EventStream<E> {
    pub fn from_events(events: Vec<E>) -> Self {
        let version = events.len() as StreamVersion;
        Self { events, version }
    }

    pub fn is_new(&self) -> bool {
        self.version == 0
    }
}

#[async_trait]
pub trait EventStore<Event>: Send + Sync
where
    Event: Clone + Send + Sync + 'static,
{
    async fn load(&self, stream_id: &str) -> Result<EventStream<Event>, EventStoreError>;

    /// Appends when the stream is still at `expected_version` and returns the new version.
    async fn append(
        &self,
        stream_id: &str,
        expected_version: StreamVersion,
        events: &[Event],
    ) -> Result<StreamVersion, EventStoreError>;
}

pub mod in_memory;
