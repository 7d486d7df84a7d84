mod auth;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::sink::{HttpSubmissionSink, LoggingSink, PgSubmissionSink, SubmissionSink};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting onboarding API v{}", env!("CARGO_PKG_VERSION"));

    let sink = build_sink(&config).await?;
    info!("Submission sink: {}", sink.backend());
    info!(
        "Wizard policy: strict_step_validation={} require_confirmation={}",
        config.strict_step_validation, config.require_confirmation
    );

    let state = AppState::new(config.clone(), sink);
    let _sweeper = state.sessions.spawn_sweeper(
        Duration::from_secs(config.session_ttl_secs),
        SESSION_SWEEP_INTERVAL,
    );
    info!("Idle wizard sessions expire after {}s", config.session_ttl_secs);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Upstream API if configured, else Postgres if configured, else log only.
async fn build_sink(config: &Config) -> Result<Arc<dyn SubmissionSink>> {
    if let Some(url) = &config.submission_url {
        let sink = HttpSubmissionSink::new(url.clone(), config.submission_token.clone())?;
        return Ok(Arc::new(sink));
    }
    if let Some(database_url) = &config.database_url {
        let pool = create_pool(database_url).await?;
        return Ok(Arc::new(PgSubmissionSink(pool)));
    }
    Ok(Arc::new(LoggingSink))
}
