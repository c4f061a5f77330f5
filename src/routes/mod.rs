pub mod impact;
pub mod plan_route;
pub mod status;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(status::status))
        .route("/api/plan-route", post(plan_route::plan_route))
        .route("/api/real-time-impact", get(impact::real_time_impact))
        .with_state(state)
}
