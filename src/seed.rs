//! Loads the JSON movie fixture into the database.

use std::path::Path;

use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use tracing::info;

use crate::{
    entities::movie,
    error::{AppResult, FixtureError},
};

/// Rows per INSERT; keeps SQLite under its bound-parameter limit.
const CHUNK_SIZE: usize = 500;

/// One entry of the fixture file.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieFixture {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    pub extract: Option<String>,
    pub thumbnail: Option<String>,
}

impl MovieFixture {
    fn into_active_model(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: Default::default(),
            title: Set(self.title),
            year: Set(self.year),
            genre: Set(self.genres.into_iter().next()),
            extract: Set(self.extract.unwrap_or_default()),
            thumbnail: Set(self.thumbnail),
        }
    }
}

pub async fn load_fixture(path: &Path) -> Result<Vec<MovieFixture>, FixtureError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| FixtureError::Read { path: path.to_path_buf(), source })?;
    parse_fixture(path, &raw)
}

fn parse_fixture(path: &Path, raw: &[u8]) -> Result<Vec<MovieFixture>, FixtureError> {
    serde_json::from_slice(raw)
        .map_err(|source| FixtureError::Parse { path: path.to_path_buf(), source })
}

/// Replaces every movie with `fixtures` in a single transaction.
pub async fn seed(db: &DatabaseConnection, fixtures: Vec<MovieFixture>) -> AppResult<usize> {
    let total = fixtures.len();
    let txn = db.begin().await?;

    let removed = movie::Entity::delete_many().exec(&txn).await?.rows_affected;

    let mut rows = fixtures.into_iter().map(MovieFixture::into_active_model).peekable();
    while rows.peek().is_some() {
        let chunk: Vec<movie::ActiveModel> = rows.by_ref().take(CHUNK_SIZE).collect();
        movie::Entity::insert_many(chunk).exec(&txn).await?;
    }

    txn.commit().await?;

    info!(removed, inserted = total, "database has been seeded");
    Ok(total)
}
