//! Anomaly chart HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin anomaly-viz-server
//!
//! # Pacific time, weeks starting on Sunday
//! DASHBOARD_UTC_OFFSET_MINUTES=-480 DASHBOARD_WEEK_START=sunday \
//!   cargo run --bin anomaly-viz-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DASHBOARD_CONFIG`: TOML configuration file
//! - `DASHBOARD_TIMEZONE`: IANA zone for calendar ranges, e.g. `America/Los_Angeles`
//! - `DASHBOARD_UTC_OFFSET_MINUTES`: fixed offset used without a zone (default: 0)
//! - `DASHBOARD_WEEK_START`: `monday` (default) or `sunday`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use anomaly_viz::config::DashboardConfig;
use anomaly_viz::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting anomaly chart server");

    let config = DashboardConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    info!(
        zone = %state.calculator.zone_name(),
        week_start = %state.calculator.week_start(),
        "Calendar settings loaded"
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
