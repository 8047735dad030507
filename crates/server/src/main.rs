use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod storage;

use config::Config;
use storage::PuzzleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PuzzleStore>,
}

pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/connectedServer", get(routes::connected))
        .route("/api/stats", get(routes::stats))
        .route(
            "/api/puzzles",
            get(routes::list_puzzles).post(routes::create_puzzle),
        )
        .route(
            "/api/puzzles/{id}",
            get(routes::get_puzzle).delete(routes::delete_puzzle),
        )
        .route("/api/puzzles/{id}/bookmark", patch(routes::bookmark_puzzle))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = match &config.db_path {
        Some(path) => PuzzleStore::open(path).await?,
        None => {
            tracing::warn!("PUZZLE_DB_PATH is empty, puzzles will not be persisted");
            PuzzleStore::in_memory()
        }
    };

    let state = AppState {
        store: Arc::new(store),
    };
    let app = app(state, config.body_limit);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Server running on http://{}", config.listen_addr());
    axum::serve(listener, app).await?;

    Ok(())
}
