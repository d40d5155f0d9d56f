use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::modules::taste_tests::core::filter::FilterState;
use crate::modules::taste_tests::core::sort::{
    SortColumn, SortConfig, SortDirection, SortParseError,
};
use crate::modules::taste_tests::core::summary::ProductSummary;
use crate::modules::taste_tests::use_cases::browse_results::query::{
    BrowseError, BrowseOutcome, BrowseResults,
};
use crate::shell::state::AppState;

const LOAD_FAILED: &str = "failed to load results";

#[derive(Debug, Default, Deserialize)]
pub struct ResultsParams {
    pub search: Option<String>,
    pub barista_only: Option<bool>,
    pub properties: Option<String>,
    pub flavors: Option<String>,
    pub owned_only: Option<bool>,
    pub user_id: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

fn key_list(value: Option<String>) -> BTreeSet<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}

impl ResultsParams {
    pub fn into_query(self) -> Result<BrowseResults, SortParseError> {
        let default = SortConfig::default();
        let sort = match (self.sort.as_deref(), self.direction.as_deref()) {
            (None, None) => default,
            (None, Some(direction)) => SortConfig::new(default.column, direction.parse()?),
            (Some(column), None) => {
                SortConfig::new(column.parse::<SortColumn>()?, SortDirection::Descending)
            }
            (Some(column), Some(direction)) => SortConfig::new(column.parse()?, direction.parse()?),
        };
        Ok(BrowseResults {
            filter: FilterState {
                search: self.search.unwrap_or_default(),
                barista_only: self.barista_only.unwrap_or(false),
                property_keys: key_list(self.properties),
                flavor_keys: key_list(self.flavors),
                owned_only: self.owned_only.unwrap_or(false),
                owner_id: self.user_id.filter(|id| !id.trim().is_empty()),
            },
            sort,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsResponse {
    Ok { items: Vec<ProductSummary> },
    Empty { items: Vec<ProductSummary> },
    Error { message: String },
}

impl From<BrowseOutcome> for ResultsResponse {
    fn from(outcome: BrowseOutcome) -> Self {
        match outcome {
            BrowseOutcome::Results(items) => Self::Ok { items },
            BrowseOutcome::NoResults => Self::Empty { items: Vec::new() },
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ResultsResponse::Error {
            message: message.into(),
        }),
    )
        .into_response()
}

fn browse_error_response(error: BrowseError) -> Response {
    match error {
        BrowseError::UnknownTag { .. } => error_response(StatusCode::BAD_REQUEST, error.to_string()),
        BrowseError::Fetch(_) => error_response(StatusCode::BAD_GATEWAY, LOAD_FAILED),
    }
}

pub async fn results(
    State(state): State<AppState>,
    Query(params): Query<ResultsParams>,
) -> impl IntoResponse {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error.to_string()),
    };
    match state.browse.handle(query).await {
        Ok(outcome) => Json(ResultsResponse::from(outcome)).into_response(),
        Err(error) => browse_error_response(error),
    }
}

pub async fn countries(State(state): State<AppState>) -> impl IntoResponse {
    match state.browse.countries().await {
        Ok(tallies) => Json(tallies).into_response(),
        Err(error) => browse_error_response(error),
    }
}

pub async fn property_taxonomy(State(state): State<AppState>) -> impl IntoResponse {
    match state.browse.property_taxonomy().await {
        Ok(taxonomy) => Json(taxonomy.tags().to_vec()).into_response(),
        Err(error) => browse_error_response(error),
    }
}

pub async fn flavor_taxonomy(State(state): State<AppState>) -> impl IntoResponse {
    match state.browse.flavor_taxonomy().await {
        Ok(taxonomy) => Json(taxonomy.tags().to_vec()).into_response(),
        Err(error) => browse_error_response(error),
    }
}
