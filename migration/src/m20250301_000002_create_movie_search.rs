use sea_orm_migration::{
    prelude::*,
    sea_orm::{ConnectionTrait, DbBackend},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Generated `tsvector` column; the title outranks the extract. Accents are
/// folded through `movie_unaccent`, which search queries apply as well.
/// `unaccent` itself is only STABLE, so generated columns need the wrapper
/// with a fixed dictionary.
const POSTGRES_UP: &[&str] = &[
    "CREATE EXTENSION IF NOT EXISTS unaccent SCHEMA public",
    r#"CREATE OR REPLACE FUNCTION movie_unaccent(text) RETURNS text
        LANGUAGE sql IMMUTABLE PARALLEL SAFE STRICT
        AS $$ SELECT public.unaccent('public.unaccent'::regdictionary, $1) $$"#,
    r#"ALTER TABLE movie ADD COLUMN IF NOT EXISTS search tsvector
        GENERATED ALWAYS AS (
            setweight(to_tsvector('english', movie_unaccent(coalesce(title, ''))), 'A') ||
            setweight(to_tsvector('english', movie_unaccent(coalesce("extract", ''))), 'B')
        ) STORED"#,
    "CREATE INDEX IF NOT EXISTS idx_movie_search ON movie USING gin(search)",
];

const POSTGRES_DOWN: &[&str] = &[
    "DROP INDEX IF EXISTS idx_movie_search",
    "ALTER TABLE movie DROP COLUMN IF EXISTS search",
    "DROP FUNCTION IF EXISTS movie_unaccent(text)",
];

/// External-content FTS5 index over `movie`, kept current by triggers.
const SQLITE_UP: &[&str] = &[
    r#"CREATE VIRTUAL TABLE IF NOT EXISTS movie_search USING fts5(
        title, "extract",
        content='movie', content_rowid='id',
        tokenize='unicode61 remove_diacritics 2'
    )"#,
    r#"CREATE TRIGGER IF NOT EXISTS movie_search_ai AFTER INSERT ON movie BEGIN
        INSERT INTO movie_search(rowid, title, "extract") VALUES (new.id, new.title, new."extract");
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS movie_search_ad AFTER DELETE ON movie BEGIN
        INSERT INTO movie_search(movie_search, rowid, title, "extract") VALUES ('delete', old.id, old.title, old."extract");
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS movie_search_au AFTER UPDATE ON movie BEGIN
        INSERT INTO movie_search(movie_search, rowid, title, "extract") VALUES ('delete', old.id, old.title, old."extract");
        INSERT INTO movie_search(rowid, title, "extract") VALUES (new.id, new.title, new."extract");
    END"#,
    "INSERT INTO movie_search(movie_search) VALUES ('rebuild')",
];

const SQLITE_DOWN: &[&str] = &[
    "DROP TRIGGER IF EXISTS movie_search_au",
    "DROP TRIGGER IF EXISTS movie_search_ad",
    "DROP TRIGGER IF EXISTS movie_search_ai",
    "DROP TABLE IF EXISTS movie_search",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let statements = match manager.get_database_backend() {
            DbBackend::Postgres => POSTGRES_UP,
            DbBackend::Sqlite => SQLITE_UP,
            other => return Err(unsupported(other)),
        };
        run_all(manager, statements).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let statements = match manager.get_database_backend() {
            DbBackend::Postgres => POSTGRES_DOWN,
            DbBackend::Sqlite => SQLITE_DOWN,
            other => return Err(unsupported(other)),
        };
        run_all(manager, statements).await
    }
}

async fn run_all(manager: &SchemaManager<'_>, statements: &[&str]) -> Result<(), DbErr> {
    let db = manager.get_connection();
    for stmt in statements {
        db.execute_unprepared(stmt).await?;
    }
    Ok(())
}

fn unsupported(backend: DbBackend) -> DbErr {
    DbErr::Migration(format!("full-text search is not available on {backend:?}"))
}
