use crate::error::{AppError, Result};
use crate::models::{ImpactQuery, RealTimeImpact};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

/// GET /api/real-time-impact
/// Live CO2 for the distance covered so far, with a re-route advisory
pub async fn real_time_impact(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImpactQuery>,
) -> Result<Json<RealTimeImpact>> {
    query.validate().map_err(AppError::InvalidRequest)?;

    let impact = state
        .impact
        .estimate(query.dist_traveled, query.efficiency_rating);

    if impact.re_route_flag {
        tracing::info!(
            dist_traveled = query.dist_traveled,
            "Re-route advised at {:.2} km",
            query.dist_traveled
        );
    }

    Ok(Json(impact))
}
