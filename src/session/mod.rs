//! ChatKit session creation
//!
//! The browser never talks to the sessions API directly. It asks this
//! server, which calls the API with the server-held key and relays the
//! resulting session object.

mod client;

pub use client::ChatKitSessionClient;

use async_trait::async_trait;
use axum::body::Bytes;
use serde::Serialize;

use crate::error::SessionError;

/// Value of the `OpenAI-Beta` header the sessions API requires
pub const CHATKIT_BETA_HEADER: &str = "chatkit_beta=v1";

/// Upper bound on upstream error text copied into responses
const MAX_ERROR_CHARS: usize = 200;

/// Outbound seam for session creation
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Create a session for `workflow_id` and return the upstream JSON body
    /// untouched.
    async fn create_session(&self, workflow_id: &str) -> Result<Bytes, SessionError>;
}

/// Body posted to the sessions API
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub workflow: WorkflowRef<'a>,
    pub chatkit_configuration: ChatKitConfiguration,
}

#[derive(Debug, Serialize)]
pub struct WorkflowRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Default, Serialize)]
pub struct ChatKitConfiguration {
    pub file_upload: FileUpload,
}

#[derive(Debug, Default, Serialize)]
pub struct FileUpload {
    pub enabled: bool,
}

impl<'a> CreateSessionRequest<'a> {
    /// Session request with file uploads disabled
    pub fn for_workflow(workflow_id: &'a str) -> Self {
        Self {
            workflow: WorkflowRef { id: workflow_id },
            chatkit_configuration: ChatKitConfiguration::default(),
        }
    }
}

/// Pull a readable message out of an upstream error body.
///
/// Accepts `{"error": "..."}`, `{"error": {"message": "..."}}` and falls
/// back to the raw (truncated) body.
pub fn upstream_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = match parsed.as_ref().and_then(|v| v.get("error")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| obj.to_string()),
        None => body.trim().chars().take(MAX_ERROR_CHARS).collect(),
    };

    if message.is_empty() {
        "no error details".to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let payload = serde_json::to_value(CreateSessionRequest::for_workflow("wf_1")).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "workflow": {"id": "wf_1"},
                "chatkit_configuration": {"file_upload": {"enabled": false}}
            })
        );
    }

    #[test]
    fn test_upstream_message_variants() {
        assert_eq!(upstream_message(r#"{"error":"boom"}"#), "boom");
        assert_eq!(
            upstream_message(r#"{"error":{"message":"Invalid workflow","type":"invalid_request_error"}}"#),
            "Invalid workflow"
        );
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(upstream_message(""), "no error details");
    }

    #[test]
    fn test_upstream_message_truncates_raw_bodies() {
        let body = "x".repeat(1000);
        assert_eq!(upstream_message(&body).len(), MAX_ERROR_CHARS);
    }
}
