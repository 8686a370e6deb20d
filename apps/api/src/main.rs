mod config;
mod errors;
mod ingest;
mod models;
mod roster;
mod routes;
mod source;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::jitter::RngJitter;
use crate::ingest::scoring::ScoringWeights;
use crate::roster::store::RosterStore;
use crate::routes::build_router;
use crate::source::{configured_provider, load_roster};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent API v{}", env!("CARGO_PKG_VERSION"));

    // A configured URL wins over a configured path
    let source = configured_provider(&config)?;

    let weights = ScoringWeights::default();
    let mut jitter = RngJitter::from_seed_option(config.score_seed);
    if config.score_seed.is_some() {
        info!("Composite jitter seeded; scores are reproducible");
    }

    // Never fails: falls back to the bundled sample
    let snapshot = load_roster(source.as_deref(), &mut jitter, &weights).await;
    info!(
        "Serving {} candidates (snapshot {})",
        snapshot.candidates.len(),
        snapshot.id
    );

    let state = AppState {
        config: config.clone(),
        roster: RosterStore::new(snapshot),
        source,
        weights: Arc::new(weights),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
