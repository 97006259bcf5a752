pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;
pub mod views;

use axum::{Router, middleware, routing::any};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use auth::Credentials;
use handlers::pages;
use service::NoteService;

/// Builds the whole HTTP application. Authentication wraps routing, so
/// unmatched paths are rejected the same way as real ones.
pub fn app(service: Arc<NoteService>, credentials: Arc<Credentials>) -> Router {
    Router::new()
        .route("/", any(pages::list_notes))
        .route("/{id}", any(pages::note))
        .fallback(pages::not_found)
        .with_state(service)
        .layer(middleware::from_fn_with_state(
            credentials,
            auth::require_basic_auth,
        ))
        .layer(TraceLayer::new_for_http())
}
