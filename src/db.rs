use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use tracing::info;

use crate::error::AppResult;

/// Long enough that the pool never recycles the only in-memory connection.
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(100 * 365 * 86_400);

const SQLITE_PRAGMAS: &[&str] =
    &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(connect_options(database_url)).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma.to_string())).await?;
        }
    }

    Migrator::up(&db, None).await?;
    info!(backend = ?db.get_database_backend(), "database connected and migrated");

    Ok(db)
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.sqlx_logging(false);
    // Each pooled connection to an in-memory SQLite database is its own
    // database, so the single connection must outlive the process.
    if database_url.contains(":memory:") {
        opt.max_connections(1)
            .min_connections(1)
            .max_lifetime(IN_MEMORY_LIFETIME)
            .idle_timeout(IN_MEMORY_LIFETIME);
    }
    opt
}
