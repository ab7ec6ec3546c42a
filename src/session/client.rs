//! ChatKit sessions API client
//!
//! Thin reqwest wrapper with a request timeout. A timed-out call surfaces as
//! [`SessionError::Timeout`] so the browser can offer a retry.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Client;

use super::{upstream_message, CreateSessionRequest, SessionApi, CHATKIT_BETA_HEADER};
use crate::config::{vars, OpenAiConfig};
use crate::error::SessionError;

pub struct ChatKitSessionClient {
    http: Client,
    api_key: String,
    sessions_url: String,
    timeout: Duration,
}

impl ChatKitSessionClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            sessions_url: config.sessions_url(),
            timeout: config.timeout,
        })
    }

    pub fn sessions_url(&self) -> &str {
        &self.sessions_url
    }

    fn classify(&self, e: reqwest::Error) -> SessionError {
        if e.is_timeout() {
            SessionError::Timeout(self.timeout)
        } else {
            SessionError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl SessionApi for ChatKitSessionClient {
    async fn create_session(&self, workflow_id: &str) -> Result<Bytes, SessionError> {
        if self.api_key.is_empty() {
            return Err(SessionError::NotConfigured(vars::API_KEY));
        }

        tracing::debug!("Creating ChatKit session for workflow {}", workflow_id);

        let response = self
            .http
            .post(&self.sessions_url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", CHATKIT_BETA_HEADER)
            .json(&CreateSessionRequest::for_workflow(workflow_id))
            .send()
            .await
            .map_err(|e| {
                let err = self.classify(e);
                tracing::error!(endpoint = %self.sessions_url, "{}", err);
                err
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let message = upstream_message(&String::from_utf8_lossy(&body));
            tracing::warn!(
                endpoint = %self.sessions_url,
                status = status.as_u16(),
                "ChatKit session creation failed: {}",
                message
            );
            return Err(SessionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        // Relayed verbatim, but it has to be JSON for the browser to use it.
        let session: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| SessionError::InvalidResponse(e.to_string()))?;
        tracing::info!(
            "ChatKit session created: {}",
            session.get("id").and_then(|v| v.as_str()).unwrap_or("<no id>")
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> OpenAiConfig {
        OpenAiConfig {
            api_key: api_key.to_string(),
            api_base: "http://127.0.0.1:1/v1/".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_sessions_url() {
        let client = ChatKitSessionClient::new(&config("sk-test")).unwrap();
        assert_eq!(client.sessions_url(), "http://127.0.0.1:1/v1/chatkit/sessions");
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let client = ChatKitSessionClient::new(&config("")).unwrap();
        let err = client.create_session("wf_1").await.unwrap_err();
        assert!(matches!(err, SessionError::NotConfigured("OPENAI_API_KEY")));
    }
}
