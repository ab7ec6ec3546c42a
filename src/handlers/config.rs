use axum::{extract::State, Json};

use crate::page::ClientConfig;
use crate::state::AppState;

/// GET /api/config
///
/// Same values the page script embeds; the API key is not part of it.
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig::from_settings(&state.settings))
}
