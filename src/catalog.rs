use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryOrder, QuerySelect,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::AppResult,
    search::{SearchHit, SearchQuery},
};

/// Read-only access to the `movie` table.
#[derive(Clone)]
pub struct MovieCatalog {
    db: DatabaseConnection,
    limit: u64,
}

impl MovieCatalog {
    pub fn new(db: DatabaseConnection, limit: u64) -> Self {
        Self { db, limit: limit.max(1) }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Newest first, then alphabetical.
    pub async fn list(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_desc(movie::Column::Year)
            .order_by_asc(movie::Column::Title)
            .limit(self.limit)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchHit>> {
        let stmt = query.statement(self.db.get_database_backend(), self.limit)?;
        let hits = SearchHit::find_by_statement(stmt).all(&self.db).await?;
        debug!(tokens = ?query.tokens(), hits = hits.len(), "search");
        Ok(hits)
    }

    /// Searches when `raw` has something to search for and lists otherwise.
    pub async fn lookup(&self, raw: &str) -> AppResult<Vec<movie::Model>> {
        match SearchQuery::parse(raw) {
            Some(query) => {
                Ok(self.search(&query).await?.into_iter().map(movie::Model::from).collect())
            },
            None => self.list().await,
        }
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }
}
