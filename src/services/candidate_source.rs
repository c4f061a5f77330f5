use crate::config::PlanFallback;
use crate::error::{AppError, Result};
use crate::models::candidate::find_duplicate_id;
use crate::models::{RouteCandidate, RouteRequest};
use crate::services::mock_routes::generate_mock_routes;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can turn a trip request into ranked candidates.
#[async_trait]
pub trait PlanningBackend: Send + Sync {
    async fn plan_route(&self, request: &RouteRequest) -> Result<Vec<RouteCandidate>>;
}

/// Resolves requests to candidate sets, first = recommended.
///
/// A rejected request always surfaces as [`AppError::RequestFailed`]. An
/// unreachable service surfaces the same way unless the fallback policy is
/// [`PlanFallback::Mock`], in which case the deterministic mock set is
/// returned instead.
#[derive(Clone)]
pub struct RouteCandidateSource {
    backend: Arc<dyn PlanningBackend>,
    fallback: PlanFallback,
}

impl RouteCandidateSource {
    pub fn new(backend: Arc<dyn PlanningBackend>, fallback: PlanFallback) -> Self {
        RouteCandidateSource { backend, fallback }
    }

    pub async fn resolve(&self, request: &RouteRequest) -> Result<Vec<RouteCandidate>> {
        match self.backend.plan_route(request).await {
            Ok(candidates) => {
                if let Some(id) = find_duplicate_id(&candidates) {
                    tracing::warn!(id, "Planning service returned duplicate candidate id");
                    return Err(AppError::RequestFailed(format!(
                        "Duplicate candidate id in response: {}",
                        id
                    )));
                }
                tracing::info!(
                    candidates = candidates.len(),
                    recommended = candidates.first().map(|c| c.id.as_str()).unwrap_or("-"),
                    "Resolved {} route candidates",
                    candidates.len()
                );
                Ok(candidates)
            }
            Err(AppError::Unreachable(reason)) => match self.fallback {
                PlanFallback::Mock => {
                    tracing::warn!(
                        "Planning service unreachable ({}). Falling back to mock candidates.",
                        reason
                    );
                    Ok(generate_mock_routes())
                }
                PlanFallback::Surface => Err(AppError::RequestFailed(format!(
                    "Planning service unreachable: {}",
                    reason
                ))),
            },
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTripFields;
    use crate::services::request_builder::RouteRequestBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubBackend {
        response: Result<Vec<RouteCandidate>>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(response: Result<Vec<RouteCandidate>>) -> Arc<Self> {
            Arc::new(StubBackend {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PlanningBackend for StubBackend {
        async fn plan_route(&self, _request: &RouteRequest) -> Result<Vec<RouteCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn request() -> RouteRequest {
        RouteRequestBuilder::build(&RawTripFields::default())
    }

    fn served() -> Vec<RouteCandidate> {
        let mut routes = generate_mock_routes();
        routes.reverse();
        routes
    }

    #[tokio::test]
    async fn test_remote_order_is_kept() {
        let backend = StubBackend::new(Ok(served()));
        let source = RouteCandidateSource::new(backend.clone(), PlanFallback::Surface);

        let candidates = source.resolve(&request()).await.unwrap();
        let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_never_falls_back() {
        let backend = StubBackend::new(Err(AppError::RequestFailed("HTTP 500".into())));
        let source = RouteCandidateSource::new(backend, PlanFallback::Mock);

        let err = source.resolve(&request()).await.unwrap_err();
        assert_eq!(err, AppError::RequestFailed("HTTP 500".into()));
    }

    #[tokio::test]
    async fn test_unreachable_surfaces_by_default() {
        let backend = StubBackend::new(Err(AppError::Unreachable("connection refused".into())));
        let source = RouteCandidateSource::new(backend, PlanFallback::Surface);

        let err = source.resolve(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_falls_back_to_mock_when_configured() {
        let backend = StubBackend::new(Err(AppError::Unreachable("timed out".into())));
        let source = RouteCandidateSource::new(backend, PlanFallback::Mock);

        let candidates = source.resolve(&request()).await.unwrap();
        assert_eq!(candidates, generate_mock_routes());
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected() {
        let mut routes = generate_mock_routes();
        routes[2].id = "A".to_string();
        let source = RouteCandidateSource::new(StubBackend::new(Ok(routes)), PlanFallback::Surface);

        let err = source.resolve(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(ref m) if m.contains("A")));
    }
}
