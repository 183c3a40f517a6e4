use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seat_engine::{
    config::{AppConfig, Config, LogFormat},
    router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;

    init_tracing(&config.app);

    info!(environment = %config.app.environment, "Starting seat engine service");
    info!(
        max_cross_row_distance = config.engine.max_cross_row_distance,
        max_selection = config.engine.max_selection,
        max_row_gap = config.engine.max_row_gap,
        reserved_is_selectable = config.engine.reserved_is_selectable,
        "Seat engine configured"
    );

    let host = config.app.host.clone();
    let port = config.app.port;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_new(&app.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
