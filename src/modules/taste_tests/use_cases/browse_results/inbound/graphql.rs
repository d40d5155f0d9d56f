use async_graphql::{Context, Enum, Object, Result as GqlResult, SimpleObject};

use crate::modules::taste_tests::core::filter::FilterState;
use crate::modules::taste_tests::core::geography::CountryTally;
use crate::modules::taste_tests::core::sort::{SortColumn, SortConfig, SortDirection};
use crate::modules::taste_tests::core::summary::ProductSummary;
use crate::modules::taste_tests::core::taxonomy::{Tag, Taxonomy};
use crate::modules::taste_tests::use_cases::browse_results::query::{
    BrowseError, BrowseOutcome, BrowseResults,
};
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlSortColumn {
    BrandName,
    ProductName,
    AvgRating,
    Count,
    MostRecentDate,
}

impl From<GqlSortColumn> for SortColumn {
    fn from(column: GqlSortColumn) -> Self {
        match column {
            GqlSortColumn::BrandName => Self::BrandName,
            GqlSortColumn::ProductName => Self::ProductName,
            GqlSortColumn::AvgRating => Self::AvgRating,
            GqlSortColumn::Count => Self::Count,
            GqlSortColumn::MostRecentDate => Self::MostRecentDate,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlSortDirection {
    Ascending,
    Descending,
}

impl From<GqlSortDirection> for SortDirection {
    fn from(direction: GqlSortDirection) -> Self {
        match direction {
            GqlSortDirection::Ascending => Self::Ascending,
            GqlSortDirection::Descending => Self::Descending,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlResultStatus {
    #[graphql(name = "OK")]
    Found,
    Empty,
}

#[derive(SimpleObject, Clone)]
pub struct GqlProductSummary {
    pub product_id: String,
    pub brand_id: String,
    pub brand_name: String,
    pub product_name: String,
    pub property_keys: Vec<String>,
    pub flavor_keys: Vec<String>,
    pub is_barista: bool,
    pub avg_rating: f64,
    pub count: i64,
    pub most_recent_date: i64,
}

impl From<ProductSummary> for GqlProductSummary {
    fn from(s: ProductSummary) -> Self {
        Self {
            product_id: s.product_id,
            brand_id: s.brand_id,
            brand_name: s.brand_name,
            product_name: s.product_name,
            property_keys: s.property_keys.into_iter().collect(),
            flavor_keys: s.flavor_keys.into_iter().collect(),
            is_barista: s.is_barista,
            avg_rating: s.avg_rating,
            count: s.count as i64,
            most_recent_date: s.most_recent_date,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlResults {
    pub status: GqlResultStatus,
    pub items: Vec<GqlProductSummary>,
}

impl From<BrowseOutcome> for GqlResults {
    fn from(outcome: BrowseOutcome) -> Self {
        match outcome {
            BrowseOutcome::Results(items) => Self {
                status: GqlResultStatus::Found,
                items: items.into_iter().map(Into::into).collect(),
            },
            BrowseOutcome::NoResults => Self {
                status: GqlResultStatus::Empty,
                items: Vec::new(),
            },
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTag {
    pub key: String,
    pub name: String,
}

impl From<&Tag> for GqlTag {
    fn from(tag: &Tag) -> Self {
        Self {
            key: tag.key.clone(),
            name: tag.name.clone(),
        }
    }
}

fn tags(taxonomy: &Taxonomy) -> Vec<GqlTag> {
    taxonomy.tags().iter().map(GqlTag::from).collect()
}

#[derive(SimpleObject, Clone)]
pub struct GqlCountryTally {
    pub country_code: String,
    pub tests: i64,
    pub products: i64,
}

impl From<CountryTally> for GqlCountryTally {
    fn from(t: CountryTally) -> Self {
        Self {
            country_code: t.country_code,
            tests: t.tests as i64,
            products: t.products as i64,
        }
    }
}

fn gql_error(error: BrowseError) -> async_graphql::Error {
    match error {
        BrowseError::Fetch(_) => async_graphql::Error::new("failed to load results"),
        BrowseError::UnknownTag { .. } => async_graphql::Error::new(error.to_string()),
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn results(
        &self,
        context: &Context<'_>,
        search: Option<String>,
        barista_only: Option<bool>,
        properties: Option<Vec<String>>,
        flavors: Option<Vec<String>>,
        owned_only: Option<bool>,
        user_id: Option<String>,
        sort: Option<GqlSortColumn>,
        direction: Option<GqlSortDirection>,
    ) -> GqlResult<GqlResults> {
        let state = context.data_unchecked::<AppState>();
        let default = SortConfig::default();
        let query = BrowseResults {
            filter: FilterState {
                search: search.unwrap_or_default(),
                barista_only: barista_only.unwrap_or(false),
                property_keys: properties.unwrap_or_default().into_iter().collect(),
                flavor_keys: flavors.unwrap_or_default().into_iter().collect(),
                owned_only: owned_only.unwrap_or(false),
                owner_id: user_id,
            },
            sort: SortConfig::new(
                sort.map(Into::into).unwrap_or(default.column),
                direction
                    .map(Into::into)
                    .unwrap_or(SortDirection::Descending),
            ),
        };
        let outcome = state.browse.handle(query).await.map_err(gql_error)?;
        Ok(outcome.into())
    }

    async fn countries(&self, context: &Context<'_>) -> GqlResult<Vec<GqlCountryTally>> {
        let state = context.data_unchecked::<AppState>();
        let tallies = state.browse.countries().await.map_err(gql_error)?;
        Ok(tallies.into_iter().map(Into::into).collect())
    }

    async fn property_taxonomy(&self, context: &Context<'_>) -> GqlResult<Vec<GqlTag>> {
        let state = context.data_unchecked::<AppState>();
        let taxonomy = state.browse.property_taxonomy().await.map_err(gql_error)?;
        Ok(tags(&taxonomy))
    }

    async fn flavor_taxonomy(&self, context: &Context<'_>) -> GqlResult<Vec<GqlTag>> {
        let state = context.data_unchecked::<AppState>();
        let taxonomy = state.browse.flavor_taxonomy().await.map_err(gql_error)?;
        Ok(tags(&taxonomy))
    }
}
