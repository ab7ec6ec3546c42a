//! Client bootstrap sequence
//!
//! The page's inline script waits for `<openai-chatkit>` to register, asks
//! the server for a session, and mounts the element. This module is the same
//! state machine with the browser behind traits, so the sequence can be
//! driven and tested without a browser. The script emitted by
//! [`crate::page`] is generated from the constants defined here.
//!
//! ```text
//! WaitingForComponent ──registered──▶ SessionPending ──ok──▶ Ready
//!         │                                 │
//!      timeout                            error
//!         ▼                                 ▼
//!  ComponentTimeout (no retry)       SessionError (retry → WaitingForComponent)
//! ```

mod machine;
pub mod retry;
pub mod theme;

pub use machine::Bootstrapper;
pub use retry::{poll_until, Clock, PollOutcome, RetryPolicy, TokioClock};
pub use theme::{ColorSchemeSignal, PreferenceStore, Theme, ThemeController};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Custom element tag registered by the hosted ChatKit script
pub const CHATKIT_ELEMENT: &str = "openai-chatkit";

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 50 x 100ms = 5 seconds
pub const MAX_POLL_ATTEMPTS: u32 = 50;

pub const DEFAULT_POLICY: RetryPolicy = RetryPolicy::new(POLL_INTERVAL, MAX_POLL_ATTEMPTS);

/// Storage key for the persisted theme preference
pub const THEME_STORAGE_KEY: &str = "theme";

/// Document-level class marking dark mode
pub const DARK_CLASS: &str = "dark";

/// Name of the window-scoped retry entry point
pub const RETRY_ENTRY_POINT: &str = "retryChatKit";

pub const COMPONENT_TIMEOUT_MESSAGE: &str = "ChatKit component not loaded. Please refresh the page.";
pub const SESSION_FAILURE_PREFIX: &str = "Failed to initialize ChatKit";

/// Visual state of the chat container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Loading,
    Error,
    Ready,
}

impl UiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Loading => "loading",
            UiState::Error => "error",
            UiState::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    WaitingForComponent,
    SessionPending,
    ComponentTimeout,
    SessionError,
    Ready,
}

impl BootstrapPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BootstrapPhase::ComponentTimeout | BootstrapPhase::SessionError | BootstrapPhase::Ready
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("{msg}", msg = COMPONENT_TIMEOUT_MESSAGE)]
    ComponentTimeout,

    #[error("{prefix}: {0}", prefix = SESSION_FAILURE_PREFIX)]
    Session(String),
}

impl BootstrapError {
    /// A missing component needs a page reload; a failed session does not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BootstrapError::Session(_))
    }
}

/// Session fields the page needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub id: String,
    pub client_secret: String,
}

/// Display options applied to every mounted element
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub placeholder: String,
    pub greeting: String,
}

/// A configured, not yet attached chat element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatElement {
    pub tag: &'static str,
    pub session_token: String,
    pub placeholder: String,
    pub greeting_text: String,
    pub theme: Theme,
}

/// The browser's custom element registry
pub trait ComponentRegistry: Send + Sync {
    fn is_defined(&self, tag: &str) -> bool;
}

/// Calls the server's session endpoint
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Error strings are shown to the user as-is.
    async fn create_session(&self) -> Result<SessionGrant, String>;
}

/// The chat container and error overlay
pub trait ChatSurface: Send {
    /// Clear the container and attach `element` as its only child
    fn mount(&mut self, element: ChatElement);
    fn set_element_theme(&mut self, theme: Theme);
    fn set_state(&mut self, state: UiState);
    fn show_error(&mut self, message: &str, retryable: bool);
    fn hide_error(&mut self);
}
