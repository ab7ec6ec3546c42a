//! Process startup

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::router::build_router;
use crate::state::AppState;

/// Validate settings, bind, and serve until the listener fails.
///
/// Validation runs before anything is bound, so a bad configuration never
/// accepts a connection.
pub async fn run(settings: Settings) -> Result<()> {
    settings.check_startup()?;

    let addr = settings.app.bind_addr();
    let debug_mode = settings.app.debug;
    let state = AppState::from_settings(settings)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(
        debug = debug_mode,
        "Starting ChatKit server on http://{}",
        addr
    );
    tracing::info!("  GET  /                    - Chat page");
    tracing::info!("  POST /api/create-session  - Create ChatKit session");
    tracing::info!("  GET  /api/health          - Health check");
    tracing::info!("  GET  /api/config          - Client configuration");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
