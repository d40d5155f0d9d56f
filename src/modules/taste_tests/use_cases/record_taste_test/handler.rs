use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::evolve::evolve;
use crate::modules::taste_tests::core::state::TasteTestState;
use crate::modules::taste_tests::use_cases::record_taste_test::command::RecordTasteTest;
use crate::modules::taste_tests::use_cases::record_taste_test::decide::decide_record;
use crate::modules::taste_tests::use_cases::record_taste_test::decision::{
    DecideError, Decision,
};
use crate::modules::taste_tests::use_cases::record_taste_test::projector::Projector;
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError, StreamVersion};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    EventStore(#[from] EventStoreError),

    #[error("domain rejected: {0}")]
    Domain(#[from] DecideError),

    #[error("projection failed: {0}")]
    Projection(anyhow::Error),

    #[error("tag vocabulary unavailable: {0}")]
    Vocabulary(anyhow::Error),
}

pub struct RecordTasteTestHandler<TEventStore>
where
    TEventStore: EventStore<TasteTestEvent> + Send + Sync + 'static,
{
    event_store: Arc<TEventStore>,
    projector: Arc<Projector>,
}

impl<TEventStore> RecordTasteTestHandler<TEventStore>
where
    TEventStore: EventStore<TasteTestEvent> + Send + Sync + 'static,
{
    pub fn new(event_store: Arc<TEventStore>, projector: Arc<Projector>) -> Self {
        Self {
            event_store,
            projector,
        }
    }

    /// Decides, appends, and projects inline so the read store sees the test immediately.
    ///
    /// A duplicate is still rejected, but only after its stored events are projected again, so
    /// a test whose first projection failed becomes visible on the retry.
    pub async fn handle(
        &self,
        stream_id: &str,
        command: RecordTasteTest,
    ) -> Result<(), ApplicationError> {
        let stream = self.event_store.load(stream_id).await?;

        let state = stream
            .events
            .iter()
            .cloned()
            .fold(TasteTestState::None, evolve);

        let events = match decide_record(&state, command) {
            Decision::Accepted { events } => events,
            Decision::Rejected {
                reason: DecideError::AlreadyExists,
            } => {
                self.project(stream_id, 0, &stream.events).await?;
                warn!(stream_id, "taste test already recorded");
                return Err(ApplicationError::Domain(DecideError::AlreadyExists));
            }
            Decision::Rejected { reason } => {
                warn!(stream_id, %reason, "taste test rejected");
                return Err(ApplicationError::Domain(reason));
            }
        };

        self.event_store
            .append(stream_id, stream.version, &events)
            .await?;

        self.project(stream_id, stream.version, &events).await?;
        info!(stream_id, "taste test recorded");
        Ok(())
    }

    /// Projects `events`, the first of which sits at `base_version + 1` in the stream.
    async fn project(
        &self,
        stream_id: &str,
        base_version: StreamVersion,
        events: &[TasteTestEvent],
    ) -> Result<(), ApplicationError> {
        for (offset, event) in events.iter().enumerate() {
            let version = base_version + offset as StreamVersion + 1;
            self.projector
                .apply_one(stream_id, version, event)
                .await
                .map_err(ApplicationError::Projection)?;
        }
        Ok(())
    }
}
