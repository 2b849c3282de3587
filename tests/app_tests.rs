use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use movies::{
    AppState, MovieCatalog, db,
    search::SearchQuery,
    seed::{self, MovieFixture},
};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tower::ServiceExt;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/movies.json")
}

async fn seeded_db() -> DatabaseConnection {
    let db = db::connect_and_migrate("sqlite::memory:").await.expect("connect");
    let fixtures = seed::load_fixture(&fixture_path()).await.expect("fixture");
    seed::seed(&db, fixtures).await.expect("seed");
    db
}

fn app(db: DatabaseConnection) -> Router {
    movies::router(Arc::new(AppState { catalog: MovieCatalog::new(db, 100) }))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn titles(movies: &[movies::entities::movie::Model]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

#[tokio::test]
async fn seed_loads_the_fixture() {
    let db = seeded_db().await;
    let catalog = MovieCatalog::new(db, 100);

    assert_eq!(catalog.count().await.unwrap(), 13);

    let all = catalog.list().await.unwrap();
    let nosferatu = all.iter().find(|m| m.title == "Nosferatu").unwrap();
    assert_eq!(nosferatu.genre, None);
    assert_eq!(nosferatu.extract, "");

    let godfather = all.iter().find(|m| m.title == "The Godfather").unwrap();
    assert_eq!(godfather.genre.as_deref(), Some("Crime"));
}

#[tokio::test]
async fn list_orders_newest_first_and_respects_limit() {
    let db = seeded_db().await;

    let all = MovieCatalog::new(db.clone(), 100).list().await.unwrap();
    assert_eq!(titles(&all)[..2], ["Amélie", "Spirited Away"]);
    assert_eq!(all.last().unwrap().title, "Nosferatu");

    let limited = MovieCatalog::new(db, 3).list().await.unwrap();
    assert_eq!(limited.len(), 3);
}

#[tokio::test]
async fn search_matches_every_prefix() {
    let catalog = MovieCatalog::new(seeded_db().await, 100);

    assert_eq!(titles(&catalog.lookup("star wa").await.unwrap()), ["Star Wars"]);
    assert_eq!(titles(&catalog.lookup("GODFATHER").await.unwrap()), ["The Godfather"]);
    assert_eq!(titles(&catalog.lookup("dinosaur").await.unwrap()), ["Jurassic Park"]);
    assert!(catalog.lookup("zzzqqq").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_folds_diacritics() {
    let catalog = MovieCatalog::new(seeded_db().await, 100);

    assert_eq!(titles(&catalog.lookup("amel").await.unwrap()), ["Amélie"]);
    assert_eq!(titles(&catalog.lookup("Amélie").await.unwrap()), ["Amélie"]);
}

#[tokio::test]
async fn title_matches_outrank_summary_matches() {
    let catalog = MovieCatalog::new(seeded_db().await, 100);

    let hits = catalog.search(&SearchQuery::parse("space").unwrap()).await.unwrap();
    let found: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();

    assert_eq!(found.len(), 3);
    assert_eq!(found[0], "Space Jam");
    assert!(found.contains(&"Alien"));
    assert!(found.contains(&"Toy Story"));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn blank_queries_list_everything() {
    let catalog = MovieCatalog::new(seeded_db().await, 100);

    assert_eq!(catalog.lookup("").await.unwrap().len(), 13);
    assert_eq!(catalog.lookup(" &|! :* ").await.unwrap().len(), 13);
}

#[tokio::test]
async fn reseeding_replaces_rows_and_search_index() {
    let db = seeded_db().await;
    let fixtures = vec![MovieFixture {
        title: "Paddington".to_string(),
        year: 2014,
        genres: vec!["Family".to_string()],
        extract: Some("A bear from Peru travels to London.".to_string()),
        thumbnail: None,
    }];

    assert_eq!(seed::seed(&db, fixtures).await.unwrap(), 1);

    let catalog = MovieCatalog::new(db, 100);
    assert_eq!(catalog.count().await.unwrap(), 1);
    assert!(catalog.lookup("godfather").await.unwrap().is_empty());
    assert_eq!(titles(&catalog.lookup("peru").await.unwrap()), ["Paddington"]);
}

#[tokio::test]
async fn index_page_renders_search_results() {
    let (status, body) = get(app(seeded_db().await), "/?q=star%20wa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Star Wars"));
    assert!(!body.contains("The Godfather"));
    assert!(body.contains(r#"value="star wa""#));
}

#[tokio::test]
async fn index_page_lists_without_query() {
    let (status, body) = get(app(seeded_db().await), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The Godfather"));
    assert!(body.contains("Nosferatu"));
}

#[tokio::test]
async fn index_page_without_matches() {
    let (status, body) = get(app(seeded_db().await), "/?q=zzzqqq").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No movies found."));
}

#[tokio::test]
async fn failed_search_renders_empty_list() {
    let db = seeded_db().await;
    db.execute_unprepared("DROP TABLE movie_search").await.unwrap();

    let (status, body) = get(app(db), "/?q=star").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No movies found."));
}

#[tokio::test]
async fn health_checks_the_database() {
    let (status, body) = get(app(seeded_db().await), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn health_reports_database_errors_as_error_page() {
    let db = seeded_db().await;
    let app = app(db.clone());
    db.close().await.unwrap();

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("<title>Error</title>"));
    assert!(body.contains(r#"href="/""#));
}

#[tokio::test]
async fn repeated_query_parameter_renders_empty_list() {
    let (status, body) = get(app(seeded_db().await), "/?q=alien&q=matrix").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Movies</title>"));
    assert!(body.contains("No movies found."));
}

#[tokio::test]
async fn missing_fixture_is_a_read_error() {
    let err = seed::load_fixture(&PathBuf::from("does/not/exist.json")).await.unwrap_err();
    assert!(matches!(err, movies::error::FixtureError::Read { .. }));
}
