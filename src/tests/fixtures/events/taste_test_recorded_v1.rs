// Shared test fixture for TasteTestRecordedV1.

use crate::modules::taste_tests::core::events::v1::taste_test_recorded::TasteTestRecordedV1;
use crate::modules::taste_tests::core::record::Rating;
use crate::tests::fixtures::commands::record_taste_test::RecordTasteTestBuilder;

/// Builder function returning a canonical event instance for tests.
pub fn make_taste_test_recorded_v1_event() -> TasteTestRecordedV1 {
    let command = RecordTasteTestBuilder::new().build();
    TasteTestRecordedV1 {
        test_id: command.test_id,
        user_id: command.user_id,
        product_id: command.product_id,
        brand_id: command.brand_id,
        brand_name: command.brand_name,
        product_name: command.product_name,
        rating: Rating::new(command.rating).unwrap(),
        is_barista: command.is_barista,
        property_keys: command.property_keys.into_iter().collect(),
        flavor_keys: command.flavor_keys.into_iter().collect(),
        country_code: command.country_code,
        notes: command.notes,
        shop: command.shop,
        price_quality: command.price_quality,
        drink_style: command.drink_style,
        created_at: command.created_at,
    }
}
