//! # homedashd
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`homedash.toml` and environment overrides)
//! - Initialise structured logging
//! - Construct the simulated backend (command executor and device source)
//! - Construct the dashboard, injecting the toast tray and render bus
//! - Start the initial registry load in the background
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_simulated::{MockDeviceSource, SimulatedExecutor};
use homedash_app::render_bus::RenderBus;
use homedash_app::services::dashboard::Dashboard;
use homedash_app::toast_tray::ToastTray;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Simulated backend
    let executor = SimulatedExecutor::new(
        config.simulation.min_latency()..config.simulation.max_latency(),
        config.simulation.failure_rate,
    );
    let source = MockDeviceSource::new(config.simulation.load_delay())
        .failing(config.simulation.fail_load);

    // Presentation sinks
    let toasts = Arc::new(ToastTray::new(
        config.notifications.ttl(),
        config.notifications.capacity,
    ));
    let renders = Arc::new(RenderBus::new(config.notifications.capacity));

    // Dashboard
    let dashboard = Arc::new(Dashboard::with_debounce(
        executor,
        Arc::clone(&toasts),
        Arc::clone(&renders),
        config.controls.debounce(),
    ));

    let loader = Arc::clone(&dashboard);
    tokio::spawn(async move {
        // The failure is already logged and shown as a notification.
        let _ = loader.load(&source).await;
    });

    // HTTP
    let state = AppState::new(dashboard, toasts, renders);
    let app = homedash_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "homedashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
