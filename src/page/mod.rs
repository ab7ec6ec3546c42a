//! Server-rendered chat page
//!
//! One document: a header with the theme toggle, the chat container in its
//! loading state, a hidden error overlay, and the inline bootstrap script.
//! The page is rendered once at startup; nothing in it varies per request.
//! Every interpolated value goes through [`markup::escape_html`] or, inside
//! the script, [`markup::script_literal`].

pub mod markup;
pub mod script;

use serde::{Deserialize, Serialize};

use crate::bootstrap::{UiState, RETRY_ENTRY_POINT};
use crate::config::Settings;
use markup::escape_html;

pub const PAGE_TITLE: &str = "ChatKit - OpenAI";
pub const STYLESHEET: &str = "/static/styles.css";

/// Configuration the browser is allowed to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub workflow_id: String,
    pub session_endpoint: String,
    pub placeholder: String,
    pub greeting: String,
}

impl ClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            workflow_id: settings.chatkit.workflow_id.clone(),
            session_endpoint: settings.app.session_endpoint.clone(),
            placeholder: settings.chatkit.placeholder.clone(),
            greeting: settings.chatkit.greeting.clone(),
        }
    }
}

/// Render the full index document
pub fn render_index(settings: &Settings) -> serde_json::Result<String> {
    let config = ClientConfig::from_settings(settings);
    let init_script = script::bootstrap_script(&config)?;
    let retry = escape_html(&format!("window.{0} && window.{0}()", RETRY_ENTRY_POINT));

    // The hosted component script is not deferred so it can register while
    // the bootstrap polls for it.
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="{stylesheet}">
    <meta name="color-scheme" content="light dark">
    <script src="{component_src}"></script>
</head>
<body>
    <div class="main-wrapper" style="display: flex; flex-direction: column; height: 100vh;">
        <div class="header" id="header">
            <div class="container" style="display: flex; justify-content: space-between; align-items: center;">
                <span style="font-size: 1.5rem; font-weight: 600;">ChatKit</span>
                <button id="theme-toggle" class="theme-toggle" type="button" title="Toggle dark mode" aria-label="Toggle dark mode">&#x1F313;</button>
            </div>
        </div>
        <div class="main">
            <div id="chatkit-container" class="chatkit-container loading" data-state="{loading}">
                <div class="spinner"></div>
            </div>
            <div id="error-overlay" class="error-overlay" style="display: none;">
                <div class="error-overlay-content">
                    <div class="error-overlay-title">Error</div>
                    <div id="error-message" class="error-overlay-message" role="alert"></div>
                    <button id="retry-button" class="error-overlay-button" type="button" onclick="{retry}">Retry</button>
                </div>
            </div>
        </div>
    </div>
    <script>
{init_script}    </script>
</body>
</html>
"#,
        title = escape_html(PAGE_TITLE),
        stylesheet = escape_html(STYLESHEET),
        component_src = escape_html(&settings.app.chatkit_script_url),
        loading = UiState::Loading.as_str(),
        retry = retry,
        init_script = init_script,
    ))
}
