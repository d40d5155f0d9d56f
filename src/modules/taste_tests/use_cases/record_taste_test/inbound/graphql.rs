use async_graphql::{Context, Enum, ID, InputObject, Object, Result as GqlResult};
use chrono::Utc;
use uuid::Uuid;

use crate::modules::taste_tests::core::record::DrinkStyle;
use crate::modules::taste_tests::use_cases::record_taste_test::command::RecordTasteTest;
use crate::modules::taste_tests::use_cases::record_taste_test::decision::DecideError;
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlDrinkStyle {
    Neat,
    Coffee,
    Tea,
    Cereal,
    Other,
}

impl From<GqlDrinkStyle> for DrinkStyle {
    fn from(style: GqlDrinkStyle) -> Self {
        match style {
            GqlDrinkStyle::Neat => Self::Neat,
            GqlDrinkStyle::Coffee => Self::Coffee,
            GqlDrinkStyle::Tea => Self::Tea,
            GqlDrinkStyle::Cereal => Self::Cereal,
            GqlDrinkStyle::Other => Self::Other,
        }
    }
}

#[derive(InputObject)]
pub struct GqlRecordTasteTestInput {
    pub test_id: Option<String>,
    pub user_id: String,
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub rating: f64,
    #[graphql(default)]
    pub is_barista: bool,
    #[graphql(default)]
    pub property_keys: Vec<String>,
    #[graphql(default)]
    pub flavor_keys: Vec<String>,
    pub country_code: Option<String>,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<i32>,
    pub drink_style: Option<GqlDrinkStyle>,
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn record_taste_test(
        &self,
        context: &Context<'_>,
        input: GqlRecordTasteTestInput,
    ) -> GqlResult<ID> {
        let state = context.data_unchecked::<AppState>();

        let price_quality = match input.price_quality {
            Some(value) => Some(
                u8::try_from(value)
                    .map_err(|_| async_graphql::Error::new(DecideError::InvalidPriceQuality.to_string()))?,
            ),
            None => None,
        };
        let test_id = input
            .test_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        let command = RecordTasteTest {
            test_id: test_id.clone(),
            user_id: input.user_id,
            product_id: input.product_id,
            brand_id: input.brand_id,
            brand_name: input.brand_name,
            product_name: input.product_name,
            rating: input.rating,
            is_barista: input.is_barista,
            property_keys: input.property_keys,
            flavor_keys: input.flavor_keys,
            country_code: input.country_code,
            notes: input.notes,
            shop: input.shop,
            price_quality,
            drink_style: input.drink_style.map(Into::into),
            created_at: Utc::now().timestamp_millis(),
        };

        let stream_id = format!("TasteTest-{test_id}");
        state
            .record_taste_test(&stream_id, command)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(ID(test_id))
    }
}
