//! Interval Timer - a tick-driven training timer served over HTTP
//!
//! This is the main entry point for the interval-timer application.

use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    api::create_router,
    config::Config,
    engine::TimerEngine,
    state::AppState,
    store::{ConfigStore, JsonFileStore, MemoryStore, MirroredStore},
    tasks::{remote_sync_task, spawn_timer_task},
    utils::shutdown_signal,
};

/// Clock source period
const TICK_PERIOD: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, audio={:?}", config.host, config.port, config.audio);

    let peer = config.peer_file.clone().map(JsonFileStore::new);
    let store: Box<dyn ConfigStore> = if config.ephemeral {
        info!("Keeping configuration in memory only");
        Box::new(MirroredStore::new(MemoryStore::new(), peer.clone()))
    } else {
        info!("Configuration file: {}", config.config_file.display());
        Box::new(MirroredStore::new(JsonFileStore::new(&config.config_file), peer.clone()))
    };

    // The engine task owns the timer; everything else talks to it through the handle
    let engine = TimerEngine::new(store, config.audio.build());
    let timer = spawn_timer_task(engine, TICK_PERIOD);

    if let Some(peer) = peer {
        info!("Linked to peer configuration at {}", peer.path().display());
        tokio::spawn(remote_sync_task(peer, timer.clone(), config.sync_period()));
    }

    let state = Arc::new(AppState::new(timer, config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /mode              - Switch mode (stopwatch, countdown, interval)");
    info!("  PUT    /config/interval   - Update interval configuration");
    info!("  PUT    /config/countdown  - Update countdown configuration");
    info!("  POST   /start | /pause | /reset");
    info!("  POST   /sequence          - Append to sequence");
    info!("  PUT    /sequence/:index   - Replace sequence entry");
    info!("  DELETE /sequence/:index   - Remove sequence entry");
    info!("  DELETE /sequence          - Clear sequence");
    info!("  PUT    /sequence/mode     - Enable or disable sequence mode");
    info!("  GET    /state             - Current timer state");
    info!("  GET    /events            - Server-sent state updates");
    info!("  GET    /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
