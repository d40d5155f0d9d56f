use crate::modules::taste_tests::adapters::outbound::projections_in_memory::InMemoryTasteTests;
use crate::modules::taste_tests::core::filter::FilterState;
use crate::modules::taste_tests::core::taxonomy::TagKind;
use crate::modules::taste_tests::use_cases::browse_results::query::{BrowseOutcome, BrowseResults};
use crate::modules::taste_tests::use_cases::record_taste_test::decision::DecideError;
use crate::modules::taste_tests::use_cases::record_taste_test::handler::ApplicationError;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shell::http::router;
use crate::shell::state::{AppState, default_flavors, default_properties};
use crate::tests::fixtures::commands::record_taste_test::RecordTasteTestBuilder;
use crate::tests::fixtures::repositories::FailingOnce;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn empty_state() -> AppState {
    AppState::in_memory(
        InMemoryTasteTests::new().with_taxonomies(default_properties(), default_flavors()),
    )
}

async fn record(state: &AppState, test_id: &str, user_id: &str, product_id: &str, rating: f64) {
    let command = RecordTasteTestBuilder::new()
        .test_id(test_id)
        .user_id(user_id)
        .product_id(product_id)
        .rating(rating)
        .build();
    state
        .record_taste_test(&format!("TasteTest-{test_id}"), command)
        .await
        .unwrap();
}

fn product_ids(outcome: BrowseOutcome) -> Vec<String> {
    outcome
        .into_items()
        .into_iter()
        .map(|summary| summary.product_id)
        .collect()
}

#[tokio::test]
async fn shows_only_the_products_a_user_tested_when_owned_only_is_set() {
    let state = empty_state();
    record(&state, "tt-1", "alice", "A", 6.0).await;
    record(&state, "tt-2", "alice", "B", 8.0).await;
    record(&state, "tt-3", "bob", "C", 9.0).await;
    record(&state, "tt-4", "bob", "A", 10.0).await;

    let everything = state.browse.handle(BrowseResults::default()).await.unwrap();
    assert_eq!(product_ids(everything), vec!["C", "A", "B"]);

    let owned = state
        .browse
        .handle(BrowseResults {
            filter: FilterState {
                owned_only: true,
                owner_id: Some("alice".into()),
                ..FilterState::default()
            },
            ..BrowseResults::default()
        })
        .await
        .unwrap();
    assert_eq!(product_ids(owned), vec!["A", "B"]);
}

#[tokio::test]
async fn reports_an_empty_state_instead_of_an_error() {
    let state = empty_state();
    let outcome = state.browse.handle(BrowseResults::default()).await.unwrap();
    assert_eq!(outcome, BrowseOutcome::NoResults);
    assert!(state.browse.countries().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_recorded_test_is_visible_to_the_next_browse() {
    let state = empty_state();
    record(&state, "tt-1", "alice", "A", 6.0).await;
    let before = state.browse.summaries().await.unwrap();
    assert_eq!(before[0].count, 1);

    record(&state, "tt-2", "bob", "A", 8.0).await;
    let after = state.browse.summaries().await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].count, 2);
    assert_eq!(after[0].avg_rating, 7.0);
}

#[tokio::test]
async fn a_retried_test_shows_up_after_its_first_projection_failed() {
    let store = Arc::new(
        InMemoryTasteTests::new().with_taxonomies(default_properties(), default_flavors()),
    );
    let state = AppState::new(
        store.clone(),
        Arc::new(FailingOnce::new(store.clone())),
        store,
        InMemoryEventStore::new(),
        Duration::from_secs(30),
    );
    let command = RecordTasteTestBuilder::new().test_id("tt-1").build();
    let outcome = state.browse.handle(BrowseResults::default()).await.unwrap();
    assert_eq!(outcome, BrowseOutcome::NoResults);

    let first = state.record_taste_test("TasteTest-tt-1", command.clone()).await;
    assert!(matches!(first, Err(ApplicationError::Projection(_))));

    let retry = state.record_taste_test("TasteTest-tt-1", command).await;
    assert!(matches!(
        retry,
        Err(ApplicationError::Domain(DecideError::AlreadyExists))
    ));
    let outcome = state.browse.handle(BrowseResults::default()).await.unwrap();
    assert_eq!(product_ids(outcome), vec!["prod-oatly-barista"]);
}

#[tokio::test]
async fn rejects_a_test_tagged_outside_the_vocabulary() {
    let state = empty_state();
    let command = RecordTasteTestBuilder::new()
        .flavor_keys(vec!["oaty".into(), "fizzy".into()])
        .build();
    let result = state.record_taste_test("TasteTest-tt-1", command).await;
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DecideError::UnknownTag { kind: TagKind::Flavor, ref key }))
            if key == "fizzy"
    ));
    assert!(state.browse.summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn records_and_browses_over_http() {
    let app = router(empty_state());
    let body = r#"{"user_id":"alice","product_id":"p-oat","brand_id":"b-oatly","brand_name":"Oatly","product_name":"Oat Drink","rating":8,"property_keys":["organic"]}"#;

    let created = app
        .clone()
        .oneshot(
            Request::post("/taste-tests")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = app
        .oneshot(
            Request::get("/results?properties=organic&search=oat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let bytes = listed.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], serde_json::json!("ok"));
    assert_eq!(json["items"][0]["product_id"], serde_json::json!("p-oat"));
    assert_eq!(json["items"][0]["avg_rating"], serde_json::json!(8.0));
}
