mod config;
mod db;
mod documents;
mod errors;
mod models;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::documents::repository::PgDocumentCorpus;
use crate::routes::build_router;
use crate::search::extractor::FileTextExtractor;
use crate::search::observer::TracingObserver;
use crate::search::pool::effective_pool_size;
use crate::search::processor::DocumentProcessor;
use crate::search::SkillSearch;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillsearch v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the search engine
    let workers = effective_pool_size(config.search.max_workers, num_cpus::get())?;
    info!(
        workers,
        batch_size = config.search.batch_size,
        wave_size = config.search.wave_size,
        "Skill search configured"
    );
    let observer = Arc::new(TracingObserver);
    let search = SkillSearch::new(
        Arc::new(PgDocumentCorpus::new(db.clone())),
        DocumentProcessor::new(Arc::new(FileTextExtractor), observer.clone()),
        observer,
        config.search,
    );

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
