//! Environment-driven configuration
//!
//! Settings are loaded once at startup into [`Settings`] and handed to the
//! router through [`crate::state::AppState`]. Handlers never read the
//! process environment themselves.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PLACEHOLDER: &str = "Ask anything...";
pub const DEFAULT_GREETING: &str = "How can I help you today?";
pub const DEFAULT_CHATKIT_SCRIPT_URL: &str = "https://chatkit.openai.com/assets/chatkit.js";

/// Path the browser posts to when it needs a new session.
pub const SESSION_ENDPOINT: &str = "/api/create-session";

/// Environment variable names
pub mod vars {
    pub const WORKFLOW_ID: &str = "CHATKIT_WORKFLOW_ID";
    pub const API_KEY: &str = "OPENAI_API_KEY";
    pub const API_BASE: &str = "OPENAI_API_BASE";
    pub const SESSION_TIMEOUT_SECS: &str = "CHATKIT_SESSION_TIMEOUT_SECS";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const DEBUG: &str = "DEBUG";
    pub const PLACEHOLDER: &str = "CHATKIT_PLACEHOLDER";
    pub const GREETING: &str = "CHATKIT_GREETING";
    pub const SCRIPT_URL: &str = "CHATKIT_SCRIPT_URL";
    pub const STATIC_DIR: &str = "STATIC_DIR";
}

/// Server process settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub session_endpoint: String,
    pub static_dir: PathBuf,
    pub chatkit_script_url: String,
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Values handed to the ChatKit web component
#[derive(Debug, Clone)]
pub struct ChatKitConfig {
    pub workflow_id: String,
    pub placeholder: String,
    pub greeting: String,
}

/// Credentials and limits for the outbound sessions API.
///
/// `Debug` redacts the key so settings can be logged.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn sessions_url(&self) -> String {
        format!("{}/chatkit/sessions", self.api_base.trim_end_matches('/'))
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("OpenAiConfig")
            .field("api_key", &key)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub app: AppConfig,
    pub chatkit: ChatKitConfig,
    pub openai: OpenAiConfig,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Blank values count as unset. Required values are not checked here,
    /// see [`Settings::validate`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let port = match get(vars::PORT) {
            Some(raw) => parse_number::<u16>(vars::PORT, &raw)?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match get(vars::SESSION_TIMEOUT_SECS) {
            Some(raw) => parse_number::<u64>(vars::SESSION_TIMEOUT_SECS, &raw)?,
            None => DEFAULT_SESSION_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: vars::SESSION_TIMEOUT_SECS,
                value: "0".into(),
                reason: "timeout must be at least one second".into(),
            });
        }
        let debug = match get(vars::DEBUG) {
            Some(raw) => parse_flag(vars::DEBUG, &raw)?,
            None => false,
        };

        let static_dir = get(vars::STATIC_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")));

        Ok(Self {
            app: AppConfig {
                host: get(vars::HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
                debug,
                session_endpoint: SESSION_ENDPOINT.to_string(),
                static_dir,
                chatkit_script_url: get(vars::SCRIPT_URL)
                    .unwrap_or_else(|| DEFAULT_CHATKIT_SCRIPT_URL.to_string()),
            },
            chatkit: ChatKitConfig {
                workflow_id: get(vars::WORKFLOW_ID)
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default(),
                placeholder: get(vars::PLACEHOLDER)
                    .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
                greeting: get(vars::GREETING).unwrap_or_else(|| DEFAULT_GREETING.to_string()),
            },
            openai: OpenAiConfig {
                api_key: get(vars::API_KEY)
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default(),
                api_base: get(vars::API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    /// Check that every required value is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chatkit.workflow_id.is_empty() {
            return Err(ConfigError::Missing {
                var: vars::WORKFLOW_ID,
            });
        }
        if self.openai.api_key.is_empty() {
            return Err(ConfigError::Missing { var: vars::API_KEY });
        }
        Ok(())
    }

    /// Run validation the way startup needs it.
    ///
    /// Failures are always logged. In debug mode they are tolerated so the
    /// page can still be worked on without credentials.
    pub fn check_startup(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(e) if self.app.debug => {
                tracing::error!("Configuration error: {} (continuing in debug mode)", e);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Configuration error: {}", e);
                Err(e)
            }
        }
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}
