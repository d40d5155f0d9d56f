// Translates taste test events into read store mutations.
//
// last_event_id is "stream_id:version" so repositories can recognise replays.

use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::record::TasteTestRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Upsert {
        record: TasteTestRecord,
        last_event_id: String,
    },
}

pub fn apply(stream_id: &str, version: i64, event: &TasteTestEvent) -> Vec<Mutation> {
    let last_event_id = format!("{stream_id}:{version}");
    match event {
        TasteTestEvent::TasteTestRecordedV1(details) => vec![Mutation::Upsert {
            record: TasteTestRecord {
                test_id: details.test_id.clone(),
                user_id: details.user_id.clone(),
                product_id: details.product_id.clone(),
                brand_id: details.brand_id.clone(),
                brand_name: details.brand_name.clone(),
                product_name: details.product_name.clone(),
                rating: details.rating,
                is_barista: details.is_barista,
                property_keys: details.property_keys.clone(),
                flavor_keys: details.flavor_keys.clone(),
                country_code: details.country_code.clone(),
                created_at: details.created_at,
                notes: details.notes.clone(),
                shop: details.shop.clone(),
                price_quality: details.price_quality,
                drink_style: details.drink_style,
            },
            last_event_id,
        }],
    }
}
