//! ChatKit server binary
//!
//! Reads configuration from the environment (and `.env`), see
//! [`chatkit_server::config::vars`] for the variable names.

use anyhow::Context;
use chatkit_server::{server, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    let debug = settings.as_ref().map(|s| s.app.debug).unwrap_or(false);
    init_tracing(debug);

    let settings = settings.context("Failed to load configuration")?;
    server::run(settings).await
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "chatkit_server=debug,tower_http=debug"
    } else {
        "chatkit_server=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
