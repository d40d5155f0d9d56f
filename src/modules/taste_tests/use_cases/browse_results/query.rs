use crate::modules::taste_tests::core::filter::FilterState;
use crate::modules::taste_tests::core::sort::SortConfig;
use crate::modules::taste_tests::core::summary::ProductSummary;
use crate::modules::taste_tests::core::taxonomy::TagKind;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseResults {
    pub filter: FilterState,
    pub sort: SortConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseOutcome {
    Results(Vec<ProductSummary>),
    NoResults,
}

impl BrowseOutcome {
    pub fn from_summaries(summaries: Vec<ProductSummary>) -> Self {
        if summaries.is_empty() {
            Self::NoResults
        } else {
            Self::Results(summaries)
        }
    }

    pub fn into_items(self) -> Vec<ProductSummary> {
        match self {
            Self::Results(items) => items,
            Self::NoResults => Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("failed to load taste tests")]
    Fetch(#[source] anyhow::Error),

    #[error("unknown {kind} tag: {key}")]
    UnknownTag { kind: TagKind, key: String },
}
