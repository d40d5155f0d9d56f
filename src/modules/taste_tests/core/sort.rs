// Ordering of product summaries by a single column.
//
// Equal keys fall back to product id ascending whatever the direction, so every ordering is
// total and independent of the sort algorithm.

use crate::modules::taste_tests::core::summary::ProductSummary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortParseError {
    #[error("unknown sort column: {0}")]
    UnknownColumn(String),

    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    BrandName,
    ProductName,
    AvgRating,
    Count,
    MostRecentDate,
}

impl FromStr for SortColumn {
    type Err = SortParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "brand_name" => Ok(Self::BrandName),
            "product_name" => Ok(Self::ProductName),
            "avg_rating" => Ok(Self::AvgRating),
            "count" => Ok(Self::Count),
            "most_recent_date" => Ok(Self::MostRecentDate),
            other => Err(SortParseError::UnknownColumn(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(SortParseError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            column: SortColumn::AvgRating,
            direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Selecting the active column flips its direction; any other column starts descending.
    pub fn toggled(self, column: SortColumn) -> Self {
        if column == self.column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::new(column, SortDirection::Descending)
        }
    }
}

/// Collation style string order: case-insensitive first, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

pub fn compare(a: &ProductSummary, b: &ProductSummary, config: SortConfig) -> Ordering {
    let primary = match config.column {
        SortColumn::BrandName => collate(&a.brand_name, &b.brand_name),
        SortColumn::ProductName => collate(&a.product_name, &b.product_name),
        SortColumn::AvgRating => a.avg_rating.total_cmp(&b.avg_rating),
        SortColumn::Count => a.count.cmp(&b.count),
        SortColumn::MostRecentDate => a.most_recent_date.cmp(&b.most_recent_date),
    };
    let directed = match config.direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    directed.then_with(|| a.product_id.cmp(&b.product_id))
}

pub fn sort_summaries(summaries: &mut [ProductSummary], config: SortConfig) {
    summaries.sort_by(|a, b| compare(a, b, config));
}
