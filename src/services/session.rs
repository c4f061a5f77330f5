use crate::error::{AppError, Result};
use crate::models::{RawTripFields, RouteCandidate, RouteRequest};
use crate::services::candidate_source::RouteCandidateSource;
use crate::services::emission_tracker::EmissionTracker;
use crate::services::request_builder::RouteRequestBuilder;
use crate::services::selection::RouteSelectionState;

/// One user's planning flow: form -> candidates -> selection -> live tracking.
///
/// Owns the selection state and the tracker so the presentation layer only
/// holds a reference to this and subscribes to their notifications.
pub struct PlanningSession {
    source: RouteCandidateSource,
    selection: RouteSelectionState,
    tracker: EmissionTracker,
    last_request: Option<RouteRequest>,
}

impl PlanningSession {
    pub fn new(source: RouteCandidateSource, tracker: EmissionTracker) -> Self {
        PlanningSession {
            source,
            selection: RouteSelectionState::new(),
            tracker,
            last_request: None,
        }
    }

    pub fn selection(&self) -> &RouteSelectionState {
        &self.selection
    }

    pub fn tracker(&self) -> &EmissionTracker {
        &self.tracker
    }

    pub fn last_request(&self) -> Option<&RouteRequest> {
        self.last_request.as_ref()
    }

    /// Plan a trip from raw form values.
    ///
    /// On success the new candidates replace the old ones, the first is
    /// selected and live tracking (re)starts. On failure nothing changes and
    /// the error is returned for the caller to show.
    pub async fn plan(&mut self, raw: &RawTripFields) -> Result<&RouteCandidate> {
        let request = RouteRequestBuilder::build(raw);

        let candidates = match self.source.resolve(&request).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Route planning failed: {}", e);
                return Err(e);
            }
        };

        if candidates.is_empty() {
            tracing::warn!("Planning service returned no candidates");
            return Err(AppError::RequestFailed(
                "No route candidates returned".to_string(),
            ));
        }

        self.selection.set_candidates(candidates);
        self.tracker.reroute_flag().set(request.reroute_enabled);
        self.tracker.start(request.fuel_type);
        self.last_request = Some(request);

        self.selection
            .current()
            .ok_or_else(|| AppError::Internal("Selection missing after plan".to_string()))
    }

    pub fn select(&mut self, id: &str) -> Result<&RouteCandidate> {
        self.selection.select(id)
    }

    /// The user left the results view: drop the candidates and close the tracker.
    pub fn leave_results(&mut self) {
        self.selection.clear();
        self.tracker.active_flag().disable();
        self.tracker.stop();
        self.last_request = None;
    }
}
