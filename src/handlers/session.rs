//! POST /api/create-session
//!
//! Any request body is ignored; the workflow and session options are fixed
//! server-side.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::vars;
use crate::error::SessionError;
use crate::state::AppState;

pub async fn create_session(State(state): State<AppState>) -> Result<Response, SessionError> {
    let workflow_id = &state.settings.chatkit.workflow_id;
    if workflow_id.is_empty() {
        tracing::error!("Session requested but {} is not set", vars::WORKFLOW_ID);
        return Err(SessionError::NotConfigured(vars::WORKFLOW_ID));
    }

    let body = state
        .sessions
        .create_session(workflow_id)
        .await
        .map_err(|e| {
            tracing::warn!(retryable = e.is_retryable(), "Session creation failed: {}", e);
            e
        })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
