//! Settings API endpoints - JSON API

use crate::AppState;
use axum::Json;
use suburbweb_config::Config;

/// Effective configuration with the bearer token masked
pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<Config> {
    Json(state.config.redacted())
}
