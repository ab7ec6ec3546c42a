//! ChatKit server
//!
//! Serves a single page hosting OpenAI's `<openai-chatkit>` web component and
//! proxies session creation to the ChatKit sessions API, so the API key stays
//! on the server.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

pub use config::Settings;
pub use error::{ConfigError, SessionError};
pub use router::build_router;
pub use state::AppState;
