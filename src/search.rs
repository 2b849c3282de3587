//! Full-text search over the `movie` table.
//!
//! A raw query is reduced to lowercase alphanumeric tokens. Each token becomes
//! a prefix match and all of them must match, so `star wa` finds
//! "Star Wars". Tokenizing first means no user input can reach the query
//! syntax of the backend.

use sea_orm::{DbBackend, FromQueryResult, Statement, Value};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
};

const MAX_TOKENS: usize = 16;

/// PostgreSQL: rank the generated `search` tsvector against the prefix tsquery.
/// The query is unaccented the same way the column is.
const POSTGRES_SEARCH: &str = r#"SELECT m.id, m.title, m.year, m.genre, m."extract", m.thumbnail,
       ts_rank(m.search, query)::float8 AS score
FROM movie m, to_tsquery('english', movie_unaccent($1)) query
WHERE m.search @@ query
ORDER BY score DESC, m.title ASC
LIMIT $2"#;

/// SQLite: the FTS5 index shares rowids with `movie`. bm25 is lower-is-better,
/// so it is negated; the title column carries ten times the extract's weight.
const SQLITE_SEARCH: &str = r#"SELECT m.id, m.title, m.year, m.genre, m."extract", m.thumbnail,
       -bm25(movie_search, 10.0, 1.0) AS score
FROM movie_search
JOIN movie m ON m.id = movie_search.rowid
WHERE movie_search MATCH ?
ORDER BY score DESC, m.title ASC
LIMIT ?"#;

/// Lowercases `raw` and splits it on anything that is not a letter or digit.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Returns `None` when `raw` holds no searchable token, which callers treat
    /// as "list everything".
    pub fn parse(raw: &str) -> Option<Self> {
        let mut tokens: Vec<String> = Vec::new();
        for token in tokenize(raw) {
            if tokens.len() == MAX_TOKENS {
                break;
            }
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        if tokens.is_empty() { None } else { Some(Self { tokens }) }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `star:* & war:*`
    pub fn to_tsquery(&self) -> String {
        self.tokens.iter().map(|t| format!("{t}:*")).collect::<Vec<_>>().join(" & ")
    }

    /// `"star"* AND "war"*`
    pub fn to_fts5_match(&self) -> String {
        self.tokens.iter().map(|t| format!("\"{t}\"*")).collect::<Vec<_>>().join(" AND ")
    }

    /// Builds the ranked search statement for `backend`. The match expression
    /// and the limit are bound as parameters.
    pub fn statement(&self, backend: DbBackend, limit: u64) -> AppResult<Statement> {
        let (sql, expr) = match backend {
            DbBackend::Postgres => (POSTGRES_SEARCH, self.to_tsquery()),
            DbBackend::Sqlite => (SQLITE_SEARCH, self.to_fts5_match()),
            other => {
                return Err(AppError::from(anyhow::anyhow!(
                    "full-text search is not supported on {other:?}"
                )));
            },
        };

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(Statement::from_sql_and_values(backend, sql, [Value::from(expr), Value::from(limit)]))
    }
}

/// A movie matched by a search together with its relevance. Higher scores rank
/// first.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct SearchHit {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub genre: Option<String>,
    pub extract: String,
    pub thumbnail: Option<String>,
    pub score: f64,
}

impl From<SearchHit> for movie::Model {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            title: hit.title,
            year: hit.year,
            genre: hit.genre,
            extract: hit.extract,
            thumbnail: hit.thumbnail,
        }
    }
}
