pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::sessions::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(db),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let app = build_router(AppState::new(db))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all routes
pub fn build_router(state: AppState) -> Router {
    // Routes that act on an existing study session
    let session_routes = Router::new()
        .route("/api/study/current", get(routes::study::current))
        .route("/api/study/action", post(routes::study::action))
        .route("/api/study/end", post(routes::study::end))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::session::session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        // Page routes
        .route("/api/pages", get(routes::pages::list).post(routes::pages::create))
        .route(
            "/api/pages/:id",
            get(routes::pages::get).delete(routes::pages::delete),
        )
        .route(
            "/api/pages/:id/words",
            get(routes::pages::words).post(routes::pages::add_word),
        )
        .route("/api/pages/:id/import", post(routes::pages::import))
        // Word routes
        .route(
            "/api/words/:id",
            get(routes::words::get).delete(routes::words::delete),
        )
        // Study routes
        .route("/api/study/start", post(routes::study::start))
        .merge(session_routes)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
