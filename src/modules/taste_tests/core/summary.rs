// Aggregation of raw taste tests into one summary per product.
//
// Descriptive attributes (names, tags, barista flag) are carried from the most recent test of
// the product; the earliest such test wins when timestamps tie. Statistics are recomputed from
// scratch on every call.

use crate::modules::taste_tests::core::record::TasteTestRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub property_keys: BTreeSet<String>,
    pub flavor_keys: BTreeSet<String>,
    pub is_barista: bool,
    pub avg_rating: f64,
    pub count: usize,
    pub most_recent_date: i64,
}

struct Accumulator<'a> {
    representative: &'a TasteTestRecord,
    rating_sum: f64,
    count: usize,
    most_recent_date: i64,
}

impl<'a> Accumulator<'a> {
    fn start(record: &'a TasteTestRecord) -> Self {
        Self {
            representative: record,
            rating_sum: record.rating.value(),
            count: 1,
            most_recent_date: record.created_at,
        }
    }

    fn add(&mut self, record: &'a TasteTestRecord) {
        self.rating_sum += record.rating.value();
        self.count += 1;
        if record.created_at > self.most_recent_date {
            self.most_recent_date = record.created_at;
            self.representative = record;
        }
    }

    fn finish(self) -> ProductSummary {
        let record = self.representative;
        ProductSummary {
            product_id: record.product_id.clone(),
            brand_id: record.brand_id.clone(),
            brand_name: record.brand_name.clone(),
            product_name: record.product_name.clone(),
            property_keys: record.property_keys.clone(),
            flavor_keys: record.flavor_keys.clone(),
            is_barista: record.is_barista,
            avg_rating: self.rating_sum / self.count as f64,
            count: self.count,
            most_recent_date: self.most_recent_date,
        }
    }
}

/// Groups records by product id. Summaries come out in order of first appearance, callers
/// that need an order sort them.
pub fn aggregate(records: &[TasteTestRecord]) -> Vec<ProductSummary> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator<'_>> = Vec::new();

    for record in records {
        match positions.get(record.product_id.as_str()) {
            Some(&position) => groups[position].add(record),
            None => {
                positions.insert(record.product_id.as_str(), groups.len());
                groups.push(Accumulator::start(record));
            }
        }
    }

    groups.into_iter().map(Accumulator::finish).collect()
}
