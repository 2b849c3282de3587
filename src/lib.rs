pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod search;
pub mod seed;
pub mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use crate::{catalog::MovieCatalog, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub catalog: MovieCatalog,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
