//! Integration tests for the public featured-recipes feed.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use plate_palette_client::AppState;
use plate_palette_client::backend::{FilterValue, SortDirection, fields};
use plate_palette_client::config::ServiceSettings;
use plate_palette_core::Role;
use plate_palette_integration_tests::{FakeBackend, Op, identity, recipe};

fn app(backend: &Arc<FakeBackend>, featured_limit: u32) -> AppState {
    let settings = ServiceSettings {
        featured_limit,
        ..ServiceSettings::default()
    };
    AppState::new(backend.clone(), settings)
}

#[tokio::test]
async fn test_feed_shows_newest_published_recipes_first() {
    let chef = identity(42, "Chef", Role::Chef);
    let backend = Arc::new(FakeBackend::new().with_recipes([
        recipe(1, "Oldest", &chef, true, 30),
        recipe(2, "Draft", &chef, false, 0),
        recipe(3, "Newest", &chef, true, 1),
        recipe(4, "Middle", &chef, true, 10),
    ]));
    let state = app(&backend, 2);

    let featured = state.feed().load_featured_recipes().await;

    assert!(!featured.load_failed);
    let titles: Vec<_> = featured.recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Middle"]);
    assert!(featured.recipes.iter().all(|r| r.is_published));
}

#[tokio::test]
async fn test_feed_query_shape() {
    let backend = Arc::new(FakeBackend::new());
    let state = app(&backend, 6);

    let featured = state.feed().load_featured_recipes().await;
    assert!(featured.recipes.is_empty());
    assert!(!featured.load_failed);

    let queries = backend.recipe_queries();
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(
        query.filter_value(fields::IS_PUBLISHED),
        Some(&FilterValue::Bool(true))
    );
    assert_eq!(query.includes(), ["chef", "reviews"]);
    assert_eq!(query.sort(), Some((fields::CREATED_AT, SortDirection::Desc)));
    assert_eq!(query.page_size(), Some(6));
}

#[tokio::test]
async fn test_feed_failure_sets_flag_without_touching_session() {
    let backend = Arc::new(FakeBackend::new());
    backend.fail(Op::Catalog);
    let state = app(&backend, 6);

    let featured = state.feed().load_featured_recipes().await;

    assert!(featured.load_failed);
    assert!(featured.recipes.is_empty());
    assert_eq!(backend.current_session_calls(), 0);
}
