// Parse boundary between untyped backend rows and validated records.
//
// Rows missing an identifier, a name, a timestamp, or carrying an out of range rating are
// rejected. Optional attributes that do not parse fall back to absent values and missing tag
// lists become empty sets.
//
// Rows are written the way they are read: the key column is `id` and `created_at` is an
// RFC 3339 timestamp. `test_id` and epoch milliseconds are still accepted on read.

use crate::modules::taste_tests::core::record::{
    DrinkStyle, PRICE_QUALITY_RANGE, Rating, RatingOutOfRange, TasteTestRecord, non_blank,
    normalize_country_code,
};
use crate::modules::taste_tests::core::taxonomy::{Tag, Taxonomy};
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Rating(#[from] RatingOutOfRange),

    #[error("unreadable timestamp: {0}")]
    Timestamp(String),

    #[error("malformed row: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowTimestamp {
    Millis(i64),
    Text(String),
}

impl RowTimestamp {
    /// Text when the instant is representable, raw milliseconds otherwise.
    pub fn from_millis(millis: i64) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(instant) => Self::Text(instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => Self::Millis(millis),
        }
    }

    fn to_millis(&self) -> Result<i64, RowError> {
        match self {
            Self::Millis(millis) => Ok(*millis),
            Self::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|instant| instant.timestamp_millis())
                .map_err(|_| RowError::Timestamp(text.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasteTestRow {
    #[serde(rename = "id", alias = "test_id")]
    pub test_id: Option<String>,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub brand_id: Option<String>,
    pub brand_name: Option<String>,
    pub product_name: Option<String>,
    pub rating: Option<f64>,
    pub is_barista: Option<bool>,
    pub property_keys: Option<Vec<String>>,
    pub flavor_keys: Option<Vec<String>>,
    pub country_code: Option<String>,
    pub created_at: Option<RowTimestamp>,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<i64>,
    pub drink_style: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RowError> {
    non_blank(value).ok_or(RowError::Missing(field))
}

fn tag_set(keys: Option<Vec<String>>) -> BTreeSet<String> {
    keys.unwrap_or_default()
        .into_iter()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

impl TryFrom<TasteTestRow> for TasteTestRecord {
    type Error = RowError;

    fn try_from(row: TasteTestRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(row.rating.ok_or(RowError::Missing("rating"))?)?;
        let created_at = row
            .created_at
            .as_ref()
            .ok_or(RowError::Missing("created at"))?
            .to_millis()?;

        Ok(Self {
            test_id: required(row.test_id, "test id")?,
            user_id: required(row.user_id, "user id")?,
            product_id: required(row.product_id, "product id")?,
            brand_id: required(row.brand_id, "brand id")?,
            brand_name: required(row.brand_name, "brand name")?,
            product_name: required(row.product_name, "product name")?,
            rating,
            is_barista: row.is_barista.unwrap_or(false),
            property_keys: tag_set(row.property_keys),
            flavor_keys: tag_set(row.flavor_keys),
            country_code: row.country_code.as_deref().and_then(normalize_country_code),
            created_at,
            notes: non_blank(row.notes),
            shop: non_blank(row.shop),
            price_quality: row
                .price_quality
                .and_then(|value| u8::try_from(value).ok())
                .filter(|value| PRICE_QUALITY_RANGE.contains(value)),
            drink_style: row.drink_style.as_deref().and_then(DrinkStyle::parse),
        })
    }
}

impl From<&TasteTestRecord> for TasteTestRow {
    fn from(record: &TasteTestRecord) -> Self {
        Self {
            test_id: Some(record.test_id.clone()),
            user_id: Some(record.user_id.clone()),
            product_id: Some(record.product_id.clone()),
            brand_id: Some(record.brand_id.clone()),
            brand_name: Some(record.brand_name.clone()),
            product_name: Some(record.product_name.clone()),
            rating: Some(record.rating.value()),
            is_barista: Some(record.is_barista),
            property_keys: Some(record.property_keys.iter().cloned().collect()),
            flavor_keys: Some(record.flavor_keys.iter().cloned().collect()),
            country_code: record.country_code.clone(),
            created_at: Some(RowTimestamp::from_millis(record.created_at)),
            notes: record.notes.clone(),
            shop: record.shop.clone(),
            price_quality: record.price_quality.map(i64::from),
            drink_style: record.drink_style.map(|style| style.as_str().to_string()),
        }
    }
}

/// Maps every row that passes the boundary. Rejected rows are logged and skipped.
pub fn parse_rows(rows: Vec<serde_json::Value>) -> Vec<TasteTestRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let parsed = serde_json::from_value::<TasteTestRow>(value)
                .map_err(|error| RowError::Malformed(error.to_string()))
                .and_then(TasteTestRecord::try_from);
            match parsed {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(row = index, %error, "skipping taste test row");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TagRow {
    key: Option<String>,
    name: Option<String>,
}

/// Tags without a key are skipped; a missing name falls back to the key.
pub fn parse_taxonomy(rows: Vec<serde_json::Value>) -> Taxonomy {
    Taxonomy::new(rows.into_iter().filter_map(|value| {
        let row: TagRow = match serde_json::from_value(value) {
            Ok(row) => row,
            Err(error) => {
                warn!(%error, "skipping taxonomy row");
                return None;
            }
        };
        let key = non_blank(row.key)?;
        let name = non_blank(row.name).unwrap_or_else(|| key.clone());
        Some(Tag::new(key, name))
    }))
}
