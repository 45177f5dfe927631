//! HTTP handlers rendering the library pages

pub mod add_book;
pub mod book_list;
pub mod health;
pub mod layout;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Views
        .route("/", get(book_list::book_list))
        .route("/add", get(add_book::add_book_form).post(add_book::submit_book))
        // Operations
        .route("/health", get(health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
