// A single user submitted taste test, as consumed by the results pipeline.
//
// Records only exist in validated form: ratings are range checked, tag lists are sets of
// taxonomy keys, and country codes are upper cased two letter codes. Untyped rows from a data
// source are mapped into this shape by the row mapping adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingOutOfRange {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    pub fn new(value: f64) -> Result<Self, RatingOutOfRange> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkStyle {
    Neat,
    Coffee,
    Tea,
    Cereal,
    Other,
}

impl DrinkStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "neat" => Some(Self::Neat),
            "coffee" => Some(Self::Coffee),
            "tea" => Some(Self::Tea),
            "cereal" => Some(Self::Cereal),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neat => "neat",
            Self::Coffee => "coffee",
            Self::Tea => "tea",
            Self::Cereal => "cereal",
            Self::Other => "other",
        }
    }
}

/// Price/quality verdicts run from 1 (poor value) to 5 (excellent value).
pub const PRICE_QUALITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteTestRecord {
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
    pub created_at: i64,
    pub notes: Option<String>,
    pub shop: Option<String>,
    pub price_quality: Option<u8>,
    pub drink_style: Option<DrinkStyle>,
}

/// Upper cases a two letter ASCII country code. Anything else is not a country code.
pub fn normalize_country_code(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

/// Trims free text and folds blank input into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
