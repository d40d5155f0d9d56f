use async_graphql::{EmptySubscription, Schema};

pub use crate::modules::taste_tests::use_cases::browse_results::inbound::graphql::QueryRoot;
pub use crate::modules::taste_tests::use_cases::record_taste_test::inbound::graphql::MutationRoot;
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}
