use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "tokenConfigured": state.map_config.has_access_token(),
    }))
}

/// Runtime map settings for the browser. Never cached so a token rotation
/// reaches clients on their next load.
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(state.map_config.as_ref().clone()),
    )
}
