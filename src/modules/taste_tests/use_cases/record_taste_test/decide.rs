use crate::modules::taste_tests::core::{
    events::{TasteTestEvent, v1::taste_test_recorded::TasteTestRecordedV1},
    record::{PRICE_QUALITY_RANGE, Rating, non_blank, normalize_country_code},
    state::TasteTestState,
};
use crate::modules::taste_tests::use_cases::record_taste_test::{
    command::RecordTasteTest,
    decision::{DecideError, Decision},
};
use std::collections::BTreeSet;

fn required(value: String, field: &'static str) -> Result<String, DecideError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DecideError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trimmed, deduplicated keys with blanks removed.
pub fn tag_keys(keys: &[String]) -> BTreeSet<String> {
    keys.iter()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

fn validate(command: RecordTasteTest) -> Result<TasteTestRecordedV1, DecideError> {
    let rating = Rating::new(command.rating).map_err(|_| DecideError::InvalidRating)?;
    if let Some(price_quality) = command.price_quality {
        if !PRICE_QUALITY_RANGE.contains(&price_quality) {
            return Err(DecideError::InvalidPriceQuality);
        }
    }
    let country_code = match non_blank(command.country_code) {
        Some(code) => Some(normalize_country_code(&code).ok_or(DecideError::InvalidCountryCode)?),
        None => None,
    };

    Ok(TasteTestRecordedV1 {
        test_id: required(command.test_id, "test id")?,
        user_id: required(command.user_id, "user id")?,
        product_id: required(command.product_id, "product id")?,
        brand_id: required(command.brand_id, "brand id")?,
        brand_name: required(command.brand_name, "brand name")?,
        product_name: required(command.product_name, "product name")?,
        rating,
        is_barista: command.is_barista,
        property_keys: tag_keys(&command.property_keys),
        flavor_keys: tag_keys(&command.flavor_keys),
        country_code,
        notes: non_blank(command.notes),
        shop: non_blank(command.shop),
        price_quality: command.price_quality,
        drink_style: command.drink_style,
        created_at: command.created_at,
    })
}

pub fn decide_record(state: &TasteTestState, command: RecordTasteTest) -> Decision {
    match state {
        TasteTestState::None => match validate(command) {
            Ok(payload) => Decision::Accepted {
                events: vec![TasteTestEvent::TasteTestRecordedV1(payload)],
            },
            Err(reason) => Decision::Rejected { reason },
        },
        TasteTestState::Recorded { .. } => Decision::Rejected {
            reason: DecideError::AlreadyExists,
        },
    }
}
