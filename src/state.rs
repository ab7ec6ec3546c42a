//! Shared application state
//!
//! Everything in here is immutable after startup, so handlers can clone it
//! freely and never lock.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::body::Bytes;

use crate::config::Settings;
use crate::page;
use crate::session::{ChatKitSessionClient, SessionApi};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<dyn SessionApi>,
    /// Pre-rendered index document
    pub index_html: Bytes,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, sessions: Arc<dyn SessionApi>) -> Result<Self> {
        let index_html = page::render_index(&settings).context("Failed to render index page")?;
        Ok(Self {
            settings: Arc::new(settings),
            sessions,
            index_html: Bytes::from(index_html),
            started_at: Instant::now(),
        })
    }

    /// State wired to the real sessions API
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let client = ChatKitSessionClient::new(&settings.openai)?;
        tracing::debug!("Session proxy targets {}", client.sessions_url());
        Self::new(settings, Arc::new(client))
    }
}
