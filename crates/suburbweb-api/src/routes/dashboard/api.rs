//! Dashboard API endpoints - JSON API

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use suburbweb_core::{DashboardQuery, EndpointOption, ReportOutcome};

/// One report as JSON. Failures carry an error code and a matching status.
pub async fn api_report(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ReportOutcome>, ApiError> {
    log::debug!("GET /api/report {:?}", query);
    let outcome = state.dashboard.run(&query).await?;
    Ok(Json(outcome))
}

/// Accepted endpoint keys, built-in first
pub async fn api_endpoints(State(state): State<AppState>) -> Json<Vec<EndpointOption>> {
    Json(state.dashboard.router().options())
}
