// Unvalidated input for recording a taste test. The decider turns it into an event or rejects it.

use crate::modules::taste_tests::core::record::DrinkStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordTasteTest {
    pub test_id: String,
    pub user_id: String,
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub rating: f64,
    pub is_barista: bool,
    pub property_keys: Vec<String>,
    pub flavor_keys: Vec<String>,
    pub country_code: Option<String>,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<u8>,
    pub drink_style: Option<DrinkStyle>,
    pub created_at: i64,
}
