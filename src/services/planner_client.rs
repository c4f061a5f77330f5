use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::{ImpactQuery, RealTimeImpact, RouteCandidate, RouteRequest};
use crate::services::candidate_source::PlanningBackend;
use crate::services::emission_tracker::ImpactSource;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const PLAN_ROUTE_PATH: &str = "/api/plan-route";
const REAL_TIME_IMPACT_PATH: &str = "/api/real-time-impact";

/// HTTP client for the planning service.
///
/// Only two outcomes are distinguished: no response at all
/// ([`AppError::Unreachable`]) and a response that is not a successful,
/// well-formed answer ([`AppError::RequestFailed`]).
#[derive(Clone)]
pub struct PlannerClient {
    client: Client,
    base_url: String,
    plan_timeout: Duration,
    sample_timeout: Duration,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(&ClientConfig {
            api_base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        PlannerClient {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            plan_timeout: config.plan_timeout,
            sample_timeout: config.sample_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the trip to `/api/plan-route`. The returned candidates keep the
    /// service's order.
    pub async fn plan_route(&self, request: &RouteRequest) -> Result<Vec<RouteCandidate>> {
        let url = format!("{}{}", self.base_url, PLAN_ROUTE_PATH);

        tracing::debug!(
            start = %request.start_location.wire_text(),
            end = %request.end_location.wire_text(),
            vehicle = %request.vehicle_mode,
            fuel = %request.fuel_type,
            priority = %request.optimization_priority,
            "Plan request to {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.plan_timeout)
            .send()
            .await
            .map_err(|e| AppError::Unreachable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, "Planning service HTTP error {}: {}", status, error_text);
            return Err(AppError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let candidates: Vec<RouteCandidate> = response
            .json()
            .await
            .map_err(|e| AppError::RequestFailed(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(candidates = candidates.len(), "Planning service returned {} candidates", candidates.len());
        Ok(candidates)
    }

    /// GET `/api/real-time-impact` for the distance covered so far.
    pub async fn real_time_impact(
        &self,
        dist_traveled: f64,
        efficiency_rating: f64,
    ) -> Result<RealTimeImpact> {
        let url = format!("{}{}", self.base_url, REAL_TIME_IMPACT_PATH);
        let query = ImpactQuery {
            dist_traveled,
            efficiency_rating,
        };

        let response = self
            .client
            .get(&url)
            .query(&query)
            .timeout(self.sample_timeout)
            .send()
            .await
            .map_err(|e| AppError::SampleFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::SampleFailed(format!("HTTP {}", response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SampleFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PlanningBackend for PlannerClient {
    async fn plan_route(&self, request: &RouteRequest) -> Result<Vec<RouteCandidate>> {
        PlannerClient::plan_route(self, request).await
    }
}

#[async_trait]
impl ImpactSource for PlannerClient {
    async fn fetch_impact(&self, dist_traveled: f64, efficiency_rating: f64) -> Result<RealTimeImpact> {
        self.real_time_impact(dist_traveled, efficiency_rating).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeouts() {
        let client = PlannerClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.plan_timeout, Duration::from_secs(5));
        assert_eq!(client.sample_timeout, Duration::from_millis(800));
    }

    #[test]
    fn test_with_config() {
        let config = ClientConfig {
            api_base_url: "http://planner:9000".to_string(),
            plan_timeout: Duration::from_secs(2),
            ..ClientConfig::default()
        };
        let client = PlannerClient::with_config(&config);
        assert_eq!(client.base_url(), "http://planner:9000");
        assert_eq!(client.plan_timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = PlannerClient::new("http://127.0.0.1:9");
        let request = crate::services::request_builder::RouteRequestBuilder::build(
            &crate::models::RawTripFields::default(),
        );

        let err = client.plan_route(&request).await.unwrap_err();
        assert!(matches!(err, AppError::Unreachable(_)), "got {:?}", err);

        let err = client.real_time_impact(0.05, 1.0).await.unwrap_err();
        assert!(matches!(err, AppError::SampleFailed(_)), "got {:?}", err);
    }
}
