use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::taxonomy::TagKind;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("taste test already exists")]
    AlreadyExists,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("rating must be between 0 and 10")]
    InvalidRating,

    #[error("price/quality must be between 1 and 5")]
    InvalidPriceQuality,

    #[error("country code must be two letters")]
    InvalidCountryCode,

    #[error("unknown {kind} tag: {key}")]
    UnknownTag { kind: TagKind, key: String },
}

pub enum Decision {
    Accepted { events: Vec<TasteTestEvent> },
    Rejected { reason: DecideError },
}
