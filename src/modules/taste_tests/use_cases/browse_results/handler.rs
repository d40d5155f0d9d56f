use crate::modules::taste_tests::core::filter::apply_filter;
use crate::modules::taste_tests::core::geography::{CountryTally, country_distribution};
use crate::modules::taste_tests::core::record::TasteTestRecord;
use crate::modules::taste_tests::core::sort::sort_summaries;
use crate::modules::taste_tests::core::summary::{ProductSummary, aggregate};
use crate::modules::taste_tests::core::taxonomy::{TagKind, Taxonomy};
use crate::modules::taste_tests::use_cases::browse_results::queries_port::TasteTestQueries;
use crate::modules::taste_tests::use_cases::browse_results::query::{
    BrowseError, BrowseOutcome, BrowseResults,
};
use crate::shared::infrastructure::query_cache::QueryCache;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AllTests,
    UserTests(String),
    PropertyTaxonomy,
    FlavorTaxonomy,
}

pub struct BrowseResultsHandler {
    queries: Arc<dyn TasteTestQueries>,
    records: QueryCache<QueryKey, Vec<TasteTestRecord>>,
    taxonomies: QueryCache<QueryKey, Taxonomy>,
}

impl BrowseResultsHandler {
    pub fn new(queries: Arc<dyn TasteTestQueries>, stale_after: Duration) -> Self {
        Self {
            queries,
            records: QueryCache::new(stale_after),
            taxonomies: QueryCache::new(stale_after),
        }
    }

    /// One summary per tested product, in first appearance order.
    pub async fn summaries(&self) -> Result<Vec<ProductSummary>, BrowseError> {
        let records = self.all_tests().await?;
        Ok(aggregate(&records))
    }

    pub async fn handle(&self, query: BrowseResults) -> Result<BrowseOutcome, BrowseError> {
        let BrowseResults { filter, sort } = query;
        self.ensure_known(TagKind::Property, &filter.property_keys)
            .await?;
        self.ensure_known(TagKind::Flavor, &filter.flavor_keys)
            .await?;

        let owned = match filter.owner_id.as_deref() {
            Some(owner_id) if filter.ownership_active() => self.owned_product_ids(owner_id).await?,
            _ => HashSet::new(),
        };

        let mut summaries = apply_filter(self.summaries().await?, &filter, &owned);
        sort_summaries(&mut summaries, sort);
        info!(
            results = summaries.len(),
            column = ?sort.column,
            direction = ?sort.direction,
            "results browsed"
        );
        Ok(BrowseOutcome::from_summaries(summaries))
    }

    pub async fn countries(&self) -> Result<Vec<CountryTally>, BrowseError> {
        let records = self.all_tests().await?;
        Ok(country_distribution(&records))
    }

    pub async fn property_taxonomy(&self) -> Result<Arc<Taxonomy>, BrowseError> {
        let queries = self.queries.clone();
        self.taxonomies
            .get_or_fetch(QueryKey::PropertyTaxonomy, || async move {
                queries.property_taxonomy().await
            })
            .await
            .map_err(Self::fetch_failed)
    }

    pub async fn flavor_taxonomy(&self) -> Result<Arc<Taxonomy>, BrowseError> {
        let queries = self.queries.clone();
        self.taxonomies
            .get_or_fetch(QueryKey::FlavorTaxonomy, || async move {
                queries.flavor_taxonomy().await
            })
            .await
            .map_err(Self::fetch_failed)
    }

    /// Drops every cached test list. In flight fetches that started earlier are discarded.
    pub async fn invalidate(&self) {
        self.records.invalidate_all().await;
    }

    async fn all_tests(&self) -> Result<Arc<Vec<TasteTestRecord>>, BrowseError> {
        let queries = self.queries.clone();
        self.records
            .get_or_fetch(QueryKey::AllTests, || async move { queries.list_all().await })
            .await
            .map_err(Self::fetch_failed)
    }

    async fn owned_product_ids(&self, owner_id: &str) -> Result<HashSet<String>, BrowseError> {
        let queries = self.queries.clone();
        let owner = owner_id.to_string();
        let records = self
            .records
            .get_or_fetch(QueryKey::UserTests(owner_id.to_string()), || async move {
                queries.list_by_user(&owner).await
            })
            .await
            .map_err(Self::fetch_failed)?;
        Ok(records
            .iter()
            .map(|record| record.product_id.clone())
            .collect())
    }

    /// Fails on the first key missing from the vocabulary of `kind`.
    pub async fn ensure_known(
        &self,
        kind: TagKind,
        keys: &BTreeSet<String>,
    ) -> Result<(), BrowseError> {
        if keys.is_empty() {
            return Ok(());
        }
        let taxonomy = match kind {
            TagKind::Property => self.property_taxonomy().await?,
            TagKind::Flavor => self.flavor_taxonomy().await?,
        };
        match taxonomy.first_unknown(keys) {
            Some(key) => {
                warn!(%kind, key, "unknown tag referenced");
                Err(BrowseError::UnknownTag {
                    kind,
                    key: key.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    fn fetch_failed(error: anyhow::Error) -> BrowseError {
        warn!(error = %error, "taste test fetch failed");
        BrowseError::Fetch(error)
    }
}
