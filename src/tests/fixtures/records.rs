// Shared test fixtures for read side records and summaries.

use crate::modules::taste_tests::adapters::outbound::projections_in_memory::InMemoryTasteTests;
use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::projections::{Mutation, apply};
use crate::modules::taste_tests::core::record::{Rating, TasteTestRecord};
use crate::modules::taste_tests::core::summary::ProductSummary;
use crate::shell::state::{default_flavors, default_properties};
use crate::tests::fixtures::events::taste_test_recorded_v1::make_taste_test_recorded_v1_event;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_TEST_ID: AtomicUsize = AtomicUsize::new(1);

fn keys(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub struct TasteTestRecordBuilder {
    inner: TasteTestRecord,
}

impl Default for TasteTestRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TasteTestRecordBuilder {
    /// Starts from the projection of the canonical recorded event.
    pub fn new() -> Self {
        let event = TasteTestEvent::TasteTestRecordedV1(make_taste_test_recorded_v1_event());
        let Some(Mutation::Upsert { record, .. }) = apply("TasteTest-fixture", 1, &event).pop()
        else {
            unreachable!("a recorded event always upserts");
        };
        Self { inner: record }
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
        self.inner.rating = Rating::new(v).unwrap();
        self
    }

    pub fn is_barista(mut self, v: bool) -> Self {
        self.inner.is_barista = v;
        self
    }

    pub fn property_keys(mut self, v: &[&str]) -> Self {
        self.inner.property_keys = keys(v);
        self
    }

    pub fn flavor_keys(mut self, v: &[&str]) -> Self {
        self.inner.flavor_keys = keys(v);
        self
    }

    pub fn country_code(mut self, v: Option<String>) -> Self {
        self.inner.country_code = v;
        self
    }

    pub fn created_at(mut self, v: i64) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn build(self) -> TasteTestRecord {
        self.inner
    }
}

/// A record with a fresh test id.
pub fn record(product_id: &str, rating: f64) -> TasteTestRecord {
    let n = NEXT_TEST_ID.fetch_add(1, Ordering::Relaxed);
    TasteTestRecordBuilder::new()
        .test_id(format!("tt-{n:04}"))
        .product_id(product_id)
        .rating(rating)
        .build()
}

pub fn summary(product_id: &str, brand_name: &str, product_name: &str) -> ProductSummary {
    ProductSummary {
        product_id: product_id.to_string(),
        brand_id: format!("brand-{product_id}"),
        brand_name: brand_name.to_string(),
        product_name: product_name.to_string(),
        property_keys: BTreeSet::new(),
        flavor_keys: BTreeSet::new(),
        is_barista: false,
        avg_rating: 5.0,
        count: 1,
        most_recent_date: 0,
    }
}

fn tasted(
    test_id: &str,
    user_id: &str,
    product: (&str, &str, &str),
    rating: f64,
    created_at: i64,
) -> TasteTestRecordBuilder {
    let (product_id, brand_name, product_name) = product;
    TasteTestRecordBuilder::new()
        .test_id(test_id)
        .user_id(user_id)
        .product_id(product_id)
        .brand_name(brand_name)
        .product_name(product_name)
        .rating(rating)
        .created_at(created_at)
        .is_barista(false)
        .country_code(None)
}

const OAT: (&str, &str, &str) = ("p-oat", "Oatly", "Oat Drink");
const SOY: (&str, &str, &str) = ("p-soy", "Alpro", "Soya Drink");
const RICE: (&str, &str, &str) = ("p-rice", "Rice Dream", "Original");

/// Three products over four tests by alice and bob, with the default taxonomies.
///
/// | product | tests (user: rating) | avg | properties | countries |
/// |---|---|---|---|---|
/// | p-oat | alice: 9, bob: 8 | 8.5 | organic | NL, NL |
/// | p-soy | alice: 7 | 7 | barista | none |
/// | p-rice | bob: 5 | 5 | organic | DE |
pub fn seeded_store() -> InMemoryTasteTests {
    InMemoryTasteTests::new()
        .with_taxonomies(default_properties(), default_flavors())
        .with_records([
            tasted("tt-1", "alice", OAT, 9.0, 1_000)
                .property_keys(&["organic"])
                .flavor_keys(&["oaty"])
                .country_code(Some("NL".into()))
                .build(),
            tasted("tt-2", "bob", OAT, 8.0, 2_000)
                .property_keys(&["organic"])
                .flavor_keys(&["oaty"])
                .country_code(Some("NL".into()))
                .build(),
            tasted("tt-3", "alice", SOY, 7.0, 3_000)
                .property_keys(&["barista"])
                .flavor_keys(&["nutty"])
                .is_barista(true)
                .build(),
            tasted("tt-4", "bob", RICE, 5.0, 4_000)
                .property_keys(&["organic"])
                .flavor_keys(&["neutral"])
                .country_code(Some("DE".into()))
                .build(),
        ])
}
