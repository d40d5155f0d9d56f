// Event payload: TasteTestRecordedV1.
//
// Records that a user tasted a product and rated it. Values are already validated by the
// decider: the rating is in range, tags are deduplicated keys, the country code is upper cased.
//
// Timestamps are epoch milliseconds.

use crate::modules::taste_tests::core::record::{DrinkStyle, Rating};
use std::collections::BTreeSet;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct TasteTestRecordedV1 {
    pub test_id: String,
    pub user_id: String,
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub rating: Rating,
    pub is_barista: bool,
    pub property_keys: BTreeSet<String>,
    pub flavor_keys: BTreeSet<String>,
    pub country_code: Option<String>,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<u8>,
    pub drink_style: Option<DrinkStyle>,
    pub created_at: i64,
}
