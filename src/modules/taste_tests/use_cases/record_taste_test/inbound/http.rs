use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::taste_tests::core::record::DrinkStyle;
use crate::modules::taste_tests::use_cases::record_taste_test::command::RecordTasteTest;
use crate::modules::taste_tests::use_cases::record_taste_test::decision::DecideError;
use crate::modules::taste_tests::use_cases::record_taste_test::handler::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RecordTasteTestBody {
    pub test_id: Option<String>,
    pub user_id: String,
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub rating: f64,
    #[serde(default)]
    pub is_barista: bool,
    #[serde(default)]
    pub property_keys: Vec<String>,
    #[serde(default)]
    pub flavor_keys: Vec<String>,
    pub country_code: Option<String>,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<u8>,
    pub drink_style: Option<DrinkStyle>,
}

#[derive(Serialize)]
pub struct RecordTasteTestResponse {
    pub test_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<RecordTasteTestBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let test_id = body
        .test_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string());
    let stream_id = format!("TasteTest-{test_id}");

    let command = RecordTasteTest {
        test_id: test_id.clone(),
        user_id: body.user_id,
        product_id: body.product_id,
        brand_id: body.brand_id,
        brand_name: body.brand_name,
        product_name: body.product_name,
        rating: body.rating,
        is_barista: body.is_barista,
        property_keys: body.property_keys,
        flavor_keys: body.flavor_keys,
        country_code: body.country_code,
        notes: body.notes,
        shop: body.shop,
        price_quality: body.price_quality,
        drink_style: body.drink_style,
        created_at: Utc::now().timestamp_millis(),
    };

    match state.record_taste_test(&stream_id, command).await {
        Ok(()) => (StatusCode::CREATED, Json(RecordTasteTestResponse { test_id })).into_response(),
        Err(ApplicationError::Domain(DecideError::AlreadyExists)) => {
            StatusCode::CONFLICT.into_response()
        }
        Err(ApplicationError::Domain(_)) => StatusCode::UNPROCESSABLE_ENTITY.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
