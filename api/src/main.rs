use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ph_api::{create_app, AppState};
use ph_core::services::ConfirmationSweeper;
use ph_shared::{AppConfig, LogFormat, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(environment = ?config.environment, "Starting PetHome API server");

    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            anyhow::bail!("PETHOME__AUTH__JWT__SECRET must be set in production");
        }
        tracing::warn!("Using the built-in JWT secret; set PETHOME__AUTH__JWT__SECRET");
    }

    let state = AppState::from_config(&config).context("failed to initialise services")?;

    let sweeper = Arc::new(ConfirmationSweeper::from_minutes(
        Arc::clone(&state.engine),
        config.confirmation.sweep_interval_minutes,
    ));
    let sweeper_handle = sweeper.start_background_task();

    let state = web::Data::new(state);
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let environment = config.environment;
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), &cors, environment, max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    sweeper_handle.abort();
    info!("Server stopped");
    Ok(())
}
