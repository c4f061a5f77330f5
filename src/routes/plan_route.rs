use crate::error::{AppError, Result};
use crate::models::{RouteCandidate, RouteRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /api/plan-route
/// Rank the simulated route candidates for a trip
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<Vec<RouteCandidate>>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        from = request.start_location.wire_text(),
        to = request.end_location.wire_text(),
        vehicle = %request.vehicle_mode,
        fuel = %request.fuel_type,
        cargo_kg = request.cargo_weight,
        priority = %request.optimization_priority,
        "Plan request: {} -> {}",
        request.start_location.wire_text(),
        request.end_location.wire_text()
    );

    let candidates = state.planner.plan(&request);
    tracing::debug!("Planned {} candidates", candidates.len());

    Ok(Json(candidates))
}
