use smartroute::config::PlanFallback;
use smartroute::models::{FeatureFlag, RawTripFields, SampleOrigin};
use smartroute::services::candidate_source::RouteCandidateSource;
use smartroute::services::emission_tracker::{EmissionTracker, TrackerEvent, TrackerSettings};
use smartroute::services::planner_client::PlannerClient;
use smartroute::services::request_builder::RouteRequestBuilder;
use smartroute::services::session::PlanningSession;
use smartroute::AppError;
use std::sync::Arc;
use std::time::Duration;

mod common;

fn form(priority: &str) -> RawTripFields {
    RawTripFields {
        start_location: "Depot 7".to_string(),
        end_location: "Harbour Gate".to_string(),
        vehicle_mode: "van".to_string(),
        fuel_type: "diesel".to_string(),
        cargo_weight: "1200".to_string(),
        optimization_priority: Some(priority.to_string()),
        reroute_enabled: true,
        ..Default::default()
    }
}

fn session_for(client: Arc<PlannerClient>, fallback: PlanFallback) -> PlanningSession {
    let source = RouteCandidateSource::new(client.clone(), fallback);
    let tracker = EmissionTracker::new(
        client,
        TrackerSettings {
            interval: Duration::from_millis(50),
            ..TrackerSettings::default()
        },
        FeatureFlag::new(false),
        FeatureFlag::new(false),
    );
    PlanningSession::new(source, tracker)
}

/// Address of a port nothing listens on
async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_plan_route_against_live_service() {
    let base_url = common::spawn_planner(0.0).await;
    let client = PlannerClient::new(base_url);

    let request = RouteRequestBuilder::build(&form("time"));
    let candidates = client.plan_route(&request).await.unwrap();

    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    // 35 * 0.85 * 1.24 = 36.89
    assert_eq!(candidates[0].eta, 36);
    assert!(candidates[0].has_label("Recommended"));
}

#[tokio::test]
async fn test_real_time_impact_against_live_service() {
    let base_url = common::spawn_planner(0.0).await;
    let client = PlannerClient::new(base_url);

    let impact = client.real_time_impact(0.15, 1.0).await.unwrap();
    assert_eq!(impact.live_co2, 0.018);
    assert_eq!(impact.efficiency_score, 98.4);
    assert!(!impact.re_route_flag);
}

#[tokio::test]
async fn test_http_error_surfaces_request_failed() {
    let base_url = common::spawn_server(common::failing_router()).await;
    let client = Arc::new(PlannerClient::new(base_url));

    let request = RouteRequestBuilder::build(&form("time"));
    let err = client.plan_route(&request).await.unwrap_err();
    assert!(matches!(err, AppError::RequestFailed(_)), "got {:?}", err);

    // Rejections never fall back, whatever the policy
    let source = RouteCandidateSource::new(client.clone(), PlanFallback::Mock);
    assert!(matches!(
        source.resolve(&request).await,
        Err(AppError::RequestFailed(_))
    ));

    let err = client.real_time_impact(0.05, 1.0).await.unwrap_err();
    assert!(matches!(err, AppError::SampleFailed(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_session_with_failing_service_keeps_state_empty() {
    let base_url = common::spawn_server(common::failing_router()).await;
    let mut session = session_for(Arc::new(PlannerClient::new(base_url)), PlanFallback::Surface);

    let err = session.plan(&form("time")).await.unwrap_err();
    assert!(matches!(err, AppError::RequestFailed(_)), "got {:?}", err);
    assert!(session.selection().current().is_none());
    assert!(session.selection().candidates().is_empty());
    assert!(!session.tracker().is_tracking());
}

#[tokio::test]
async fn test_unreachable_service_with_mock_fallback() {
    let client = Arc::new(PlannerClient::new(closed_address().await));
    let request = RouteRequestBuilder::build(&form("time"));

    let surfaced = RouteCandidateSource::new(client.clone(), PlanFallback::Surface);
    assert!(matches!(
        surfaced.resolve(&request).await,
        Err(AppError::RequestFailed(_))
    ));

    let mocked = RouteCandidateSource::new(client, PlanFallback::Mock);
    let candidates = mocked.resolve(&request).await.unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].labels, vec!["Fastest"]);
}

#[tokio::test]
async fn test_session_end_to_end() {
    let base_url = common::spawn_planner(1.0).await;
    let mut session = session_for(Arc::new(PlannerClient::new(base_url)), PlanFallback::Surface);
    let mut events = session.tracker().subscribe();

    let recommended = session.plan(&form("eco")).await.unwrap();
    assert_eq!(recommended.id, "B");
    assert!(session.selection().is_recommended("B"));

    assert_eq!(session.select("C").unwrap().name, "Urban Transit");
    assert!(matches!(
        session.select("Z"),
        Err(AppError::UnknownCandidate(_))
    ));
    assert_eq!(session.selection().current().unwrap().id, "C");

    // Probability 1.0: the first remote sample advises a re-route
    let first = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    match first {
        TrackerEvent::Sample(sample) => {
            assert_eq!(sample.origin, SampleOrigin::Remote);
            assert!((sample.distance_km - 0.05).abs() < 1e-9);
            assert!(sample.reroute_advised);
        }
        other => panic!("unexpected event {:?}", other),
    }
    let second = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, TrackerEvent::RerouteDetected);

    session.leave_results();
    assert!(session.selection().current().is_none());
    assert!(!session.tracker().is_tracking());
}
