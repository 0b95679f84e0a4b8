//! Development server for FilmHub Events UI development
//!
//! Runs the in-memory stand-in for the events backend, seeded with a few
//! events and movies, so the UI can be worked on without the real backend.
//!
//! Usage: cargo run -p dev-server
//!
//! Optional environment variables (or a .env file):
//! - IP_ADDRESS: bind address, defaults to 127.0.0.1
//! - PORT: bind port, defaults to an OS-assigned port
//! - ADMIN_PASSCODE: passcode for creating/deleting events, defaults to letmein
//! - WRAP_EVENT_LIST: set to 1 to serve `{"events": [...]}` from GET /events

use anyhow::Result;
use test_helpers::{backend::MockConfig, mock::DevDataset, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Silently ignore a missing .env file
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting FilmHub Events development server");

    let (app, handle) = test_helpers::start(MockConfig::from_env())?;
    let dataset = DevDataset::create(&app);

    info!("🎯 Development server ready!");
    info!("   API: {}", app.address());
    info!("   UI:  cd ui && BACKEND_URL={} trunk serve", app.address());
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::select! {
        result = handle => {
            if let Err(e) = result? {
                telemetry::log_error(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutting down development server");
        }
    }
    Ok(())
}
