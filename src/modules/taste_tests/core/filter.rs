// Predicate filtering over product summaries.
//
// A summary is kept when every active predicate passes. Tag predicates match when the summary
// carries any one of the selected keys.

use crate::modules::taste_tests::core::summary::ProductSummary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub barista_only: bool,
    pub property_keys: BTreeSet<String>,
    pub flavor_keys: BTreeSet<String>,
    pub owned_only: bool,
    pub owner_id: Option<String>,
}

impl FilterState {
    pub fn ownership_active(&self) -> bool {
        self.owned_only && self.owner_id.is_some()
    }

    /// The search text as given, lowercased. Blank text searches nothing.
    fn search_term(&self) -> Option<String> {
        (!self.search.trim().is_empty()).then(|| self.search.to_lowercase())
    }
}

fn any_tag(selected: &BTreeSet<String>, carried: &BTreeSet<String>) -> bool {
    selected.is_empty() || !selected.is_disjoint(carried)
}

fn matches_search(summary: &ProductSummary, term: Option<&str>) -> bool {
    match term {
        None => true,
        Some(term) => {
            summary.brand_name.to_lowercase().contains(term)
                || summary.product_name.to_lowercase().contains(term)
        }
    }
}

fn passes(
    summary: &ProductSummary,
    filter: &FilterState,
    term: Option<&str>,
    owned_product_ids: &HashSet<String>,
) -> bool {
    matches_search(summary, term)
        && (!filter.ownership_active() || owned_product_ids.contains(&summary.product_id))
        && (!filter.barista_only || summary.is_barista)
        && any_tag(&filter.property_keys, &summary.property_keys)
        && any_tag(&filter.flavor_keys, &summary.flavor_keys)
}

/// `owned_product_ids` holds the products the owner has tested. It is only consulted when the
/// ownership predicate is active.
pub fn matches(
    summary: &ProductSummary,
    filter: &FilterState,
    owned_product_ids: &HashSet<String>,
) -> bool {
    passes(
        summary,
        filter,
        filter.search_term().as_deref(),
        owned_product_ids,
    )
}

pub fn apply_filter(
    summaries: Vec<ProductSummary>,
    filter: &FilterState,
    owned_product_ids: &HashSet<String>,
) -> Vec<ProductSummary> {
    let term = filter.search_term();
    summaries
        .into_iter()
        .filter(|summary| passes(summary, filter, term.as_deref(), owned_product_ids))
        .collect()
}
