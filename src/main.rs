use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use movies::{AppState, Config, MovieCatalog, db, seed};

/// Movie list with full-text search
#[derive(Parser)]
#[command(name = "movies")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the movie page (default)
    Serve,

    /// Replace all movies with the contents of a JSON fixture
    Seed {
        /// Fixture path; defaults to SEED_FILE
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,movies=debug,sqlx=warn".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(Config::from_env()?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Seed { file } => {
            let path = file.unwrap_or_else(|| config.seed_file.clone());
            let db = db::connect_and_migrate(&config.database_url).await?;
            let fixtures = seed::load_fixture(&path).await?;
            seed::seed(&db, fixtures).await.context("seeding failed")?;
            Ok(())
        },
    }
}

async fn serve(config: Arc<Config>) -> anyhow::Result<()> {
    let db = db::connect_and_migrate(&config.database_url).await?;
    let catalog = MovieCatalog::new(db, config.movie_limit);

    let count = catalog.count().await?;
    if count == 0 {
        tracing::warn!("movie table is empty; run `movies seed` to load the fixture");
    }

    let state = Arc::new(AppState { catalog });
    let app = movies::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, movies = count, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
