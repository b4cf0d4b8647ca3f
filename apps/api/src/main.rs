use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobmatch_api::config::Config;
use jobmatch_api::store::InMemoryStore;
use jobmatch_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable or inconsistent values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "jobmatch_api={},tower_http={}",
                &config.rust_log, &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the store (seeded from SEED_PATH when set)
    let store = match &config.seed_path {
        Some(path) => InMemoryStore::load(path).await?,
        None => {
            info!("SEED_PATH not set; starting with an empty store");
            InMemoryStore::new()
        }
    };

    let weights = &config.matching.weights;
    info!(
        "Matching weights: skills={} experience={} location={} compensation={} job_type={}",
        weights.skills, weights.experience, weights.location, weights.compensation, weights.job_type
    );

    // Build app state
    let state = AppState::in_memory(config.clone(), Arc::new(store))?;

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
