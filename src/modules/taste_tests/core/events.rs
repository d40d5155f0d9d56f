// Root event enumeration for taste tests.
//
// Versioning
// - Prefer additive changes. A breaking change gets a new payload version and a new variant.
// - Historical events keep their meaning.

pub mod v1 {
    pub mod taste_test_recorded;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TasteTestEvent {
    TasteTestRecordedV1(v1::taste_test_recorded::TasteTestRecordedV1),
}
