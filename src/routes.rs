use std::sync::Arc;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use sea_orm::{ConnectionTrait, Statement};
use serde::Deserialize;
use tracing::warn;

use crate::{AppState, error::AppResult, templates};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    q: String,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    params: Result<Query<IndexQuery>, QueryRejection>,
) -> Html<String> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(err) => {
            warn!(error = %err, "malformed query string");
            return Html(templates::index_page("", &[]));
        },
    };
    let query = params.q.trim();

    let movies = match state.catalog.lookup(query).await {
        Ok(movies) => movies,
        Err(err) => {
            warn!(query = %query, error = %err, "movie lookup failed");
            Vec::new()
        },
    };

    Html(templates::index_page(query, &movies))
}

pub async fn health(State(state): State<Arc<AppState>>) -> AppResult<&'static str> {
    let db = state.catalog.db();
    db.execute(Statement::from_string(db.get_database_backend(), "SELECT 1".to_string())).await?;
    Ok("ok")
}
