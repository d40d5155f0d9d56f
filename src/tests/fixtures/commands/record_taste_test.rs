// Shared test fixture for the RecordTasteTest command.

use crate::modules::taste_tests::core::record::DrinkStyle;
use crate::modules::taste_tests::use_cases::record_taste_test::command::RecordTasteTest;
use serde::Deserialize;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct RecordTasteTestDto {
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
}

pub struct RecordTasteTestBuilder {
    inner: RecordTasteTest,
}

impl Default for RecordTasteTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RecordTasteTestBuilder {
    pub fn new() -> Self {
        let dto: RecordTasteTestDto =
            serde_json::from_str(include_str!("json/record_taste_test.json")).unwrap();

        Self {
            inner: RecordTasteTest {
                test_id: dto.test_id,
                user_id: dto.user_id,
                product_id: dto.product_id,
                brand_id: dto.brand_id,
                brand_name: dto.brand_name,
                product_name: dto.product_name,
                rating: dto.rating,
                is_barista: dto.is_barista,
                property_keys: dto.property_keys,
                flavor_keys: dto.flavor_keys,
                country_code: dto.country_code,
                notes: dto.notes,
                shop: dto.shop,
                price_quality: dto.price_quality,
                drink_style: dto.drink_style,
                created_at: 1700000000000,
            },
        }
    }

    pub fn test_id(mut self, v: impl Into<String>) -> Self {
        self.inner.test_id = v.into();
        self
    }

    pub fn user_id(mut self, v: impl Into<String>) -> Self {
        self.inner.user_id = v.into();
        self
    }

    pub fn product_id(mut self, v: impl Into<String>) -> Self {
        self.inner.product_id = v.into();
        self
    }

    pub fn brand_name(mut self, v: impl Into<String>) -> Self {
        self.inner.brand_name = v.into();
        self
    }

    pub fn product_name(mut self, v: impl Into<String>) -> Self {
        self.inner.product_name = v.into();
        self
    }

    pub fn rating(mut self, v: f64) -> Self {
        self.inner.rating = v;
        self
    }

    pub fn property_keys(mut self, v: Vec<String>) -> Self {
        self.inner.property_keys = v;
        self
    }

    pub fn flavor_keys(mut self, v: Vec<String>) -> Self {
        self.inner.flavor_keys = v;
        self
    }

    pub fn country_code(mut self, v: Option<String>) -> Self {
        self.inner.country_code = v;
        self
    }

    pub fn notes(mut self, v: Option<String>) -> Self {
        self.inner.notes = v;
        self
    }

    pub fn shop(mut self, v: Option<String>) -> Self {
        self.inner.shop = v;
        self
    }

    pub fn price_quality(mut self, v: Option<u8>) -> Self {
        self.inner.price_quality = v;
        self
    }

    pub fn created_at(mut self, v: i64) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn build(self) -> RecordTasteTest {
        self.inner
    }
}

#[cfg(test)]
mod record_taste_test_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = RecordTasteTestBuilder::default().build();
        assert_eq!(built.test_id, "tt-fixed-0001");
        assert_eq!(built.product_id, "prod-oatly-barista");
        assert_eq!(built.property_keys, vec!["barista", "fortified"]);
        assert_eq!(built.price_quality, Some(4));
        assert_eq!(built.created_at, 1_700_000_000_000i64);
    }

    #[rstest]
    fn setters_override_fields_and_build_returns_inner() {
        let custom = RecordTasteTestBuilder::new()
            .test_id("tt-123")
            .user_id("u-456")
            .product_id("p-789")
            .rating(3.0)
            .country_code(None)
            .price_quality(None)
            .created_at(3333)
            .build();

        assert_eq!(custom.test_id, "tt-123");
        assert_eq!(custom.user_id, "u-456");
        assert_eq!(custom.product_id, "p-789");
        assert_eq!(custom.rating, 3.0);
        assert_eq!(custom.country_code, None);
        assert_eq!(custom.price_quality, None);
        assert_eq!(custom.created_at, 3333);
    }
}
