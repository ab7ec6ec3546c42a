use axum::{extract::State, response::Html};

use crate::state::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<axum::body::Bytes> {
    Html(state.index_html.clone())
}
