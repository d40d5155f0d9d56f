use crate::modules::taste_tests::adapters::outbound::projections::{
    TasteTestProjectionRepository, WatermarkRepository,
};
use crate::modules::taste_tests::adapters::outbound::projections_in_memory::InMemoryTasteTests;
use crate::modules::taste_tests::adapters::outbound::rest_backend::RestTasteTests;
use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::taxonomy::{Tag, TagKind, Taxonomy};
use crate::modules::taste_tests::use_cases::browse_results::handler::BrowseResultsHandler;
use crate::modules::taste_tests::use_cases::browse_results::queries_port::TasteTestQueries;
use crate::modules::taste_tests::use_cases::browse_results::query::BrowseError;
use crate::modules::taste_tests::use_cases::record_taste_test::command::RecordTasteTest;
use crate::modules::taste_tests::use_cases::record_taste_test::decide::tag_keys;
use crate::modules::taste_tests::use_cases::record_taste_test::decision::DecideError;
use crate::modules::taste_tests::use_cases::record_taste_test::handler::{
    ApplicationError, RecordTasteTestHandler,
};
use crate::modules::taste_tests::use_cases::record_taste_test::projector::Projector;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shell::config::Config;
use std::sync::Arc;
use std::time::Duration;

const PROJECTOR_NAME: &str = "taste_test_results";
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub browse: Arc<BrowseResultsHandler>,
    pub record_handler: Arc<RecordTasteTestHandler<InMemoryEventStore<TasteTestEvent>>>,
}

impl AppState {
    pub fn new(
        queries: Arc<dyn TasteTestQueries>,
        repository: Arc<dyn TasteTestProjectionRepository>,
        watermark: Arc<dyn WatermarkRepository>,
        event_store: InMemoryEventStore<TasteTestEvent>,
        stale_after: Duration,
    ) -> Self {
        let projector = Arc::new(Projector::new(PROJECTOR_NAME, repository, watermark));
        Self {
            browse: Arc::new(BrowseResultsHandler::new(queries, stale_after)),
            record_handler: Arc::new(RecordTasteTestHandler::new(
                Arc::new(event_store),
                projector,
            )),
        }
    }

    /// Everything backed by one in memory store.
    pub fn in_memory(store: InMemoryTasteTests) -> Self {
        Self::with_event_store(store, InMemoryEventStore::new())
    }

    pub fn with_event_store(
        store: InMemoryTasteTests,
        event_store: InMemoryEventStore<TasteTestEvent>,
    ) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store.clone(),
            store,
            event_store,
            DEFAULT_STALE_AFTER,
        )
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match &config.backend {
            Some(backend) => {
                let rest = Arc::new(RestTasteTests::new(
                    backend.url.clone(),
                    backend.api_key.clone(),
                    backend.timeout,
                )?);
                Ok(Self::new(
                    rest.clone(),
                    rest,
                    Arc::new(InMemoryTasteTests::new()),
                    InMemoryEventStore::new(),
                    config.stale_after,
                ))
            }
            None => {
                let store = Arc::new(InMemoryTasteTests::new().with_taxonomies(
                    default_properties(),
                    default_flavors(),
                ));
                Ok(Self::new(
                    store.clone(),
                    store.clone(),
                    store,
                    InMemoryEventStore::new(),
                    config.stale_after,
                ))
            }
        }
    }

    /// Records the test, then drops cached result lists so the next browse sees it.
    ///
    /// Tags must come from the property and flavor vocabularies. Failures that may still have
    /// touched the read store invalidate too.
    pub async fn record_taste_test(
        &self,
        stream_id: &str,
        command: RecordTasteTest,
    ) -> Result<(), ApplicationError> {
        self.ensure_known_tags(&command).await?;
        let result = self.record_handler.handle(stream_id, command).await;
        if matches!(
            result,
            Ok(())
                | Err(ApplicationError::Projection(_))
                | Err(ApplicationError::Domain(DecideError::AlreadyExists))
        ) {
            self.browse.invalidate().await;
        }
        result
    }

    async fn ensure_known_tags(&self, command: &RecordTasteTest) -> Result<(), ApplicationError> {
        for (kind, keys) in [
            (TagKind::Property, &command.property_keys),
            (TagKind::Flavor, &command.flavor_keys),
        ] {
            self.browse
                .ensure_known(kind, &tag_keys(keys))
                .await
                .map_err(|error| match error {
                    BrowseError::UnknownTag { kind, key } => {
                        ApplicationError::Domain(DecideError::UnknownTag { kind, key })
                    }
                    BrowseError::Fetch(source) => ApplicationError::Vocabulary(source),
                })?;
        }
        Ok(())
    }
}

pub fn default_properties() -> Taxonomy {
    Taxonomy::new([
        Tag::new("barista", "Barista"),
        Tag::new("organic", "Organic"),
        Tag::new("fortified", "Fortified"),
        Tag::new("sugar_free", "Sugar free"),
        Tag::new("gluten_free", "Gluten free"),
    ])
}

pub fn default_flavors() -> Taxonomy {
    Taxonomy::new([
        Tag::new("creamy", "Creamy"),
        Tag::new("oaty", "Oaty"),
        Tag::new("nutty", "Nutty"),
        Tag::new("sweet", "Sweet"),
        Tag::new("neutral", "Neutral"),
        Tag::new("watery", "Watery"),
    ])
}
