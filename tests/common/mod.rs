use axum::{http::StatusCode, routing::{get, post}, Router};
use smartroute::services::impact::ImpactEstimator;
use smartroute::services::route_planner::RoutePlanner;
use smartroute::AppState;
use std::sync::Arc;

/// Planning service state with a fixed re-route probability
#[allow(dead_code)]
pub fn test_state(reroute_probability: f64) -> Arc<AppState> {
    Arc::new(AppState {
        planner: RoutePlanner::new(),
        impact: ImpactEstimator::new(reroute_probability),
    })
}

/// Router that answers every planning call with HTTP 500
#[allow(dead_code)]
pub fn failing_router() -> Router {
    async fn fail() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "planner crashed")
    }

    Router::new()
        .route("/api/plan-route", post(fail))
        .route("/api/real-time-impact", get(fail))
}

/// Serve `router` on an ephemeral local port and return its base URL
#[allow(dead_code)]
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Serve the real planning router and return its base URL
#[allow(dead_code)]
pub async fn spawn_planner(reroute_probability: f64) -> String {
    spawn_server(smartroute::routes::create_router(test_state(reroute_probability))).await
}
