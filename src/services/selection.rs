use crate::error::{AppError, Result};
use crate::models::RouteCandidate;
use tokio::sync::broadcast;

const NOTIFICATION_CAPACITY: usize = 16;

/// Sent whenever the highlighted candidate changes. `selected` is `None`
/// after the state is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged {
    pub selected: Option<RouteCandidate>,
}

/// The candidate set currently on screen and which one is chosen.
///
/// The selection is always either absent (nothing loaded) or the id of a
/// member of the current set.
pub struct RouteSelectionState {
    candidates: Vec<RouteCandidate>,
    selected: Option<usize>,
    notifier: broadcast::Sender<SelectionChanged>,
}

impl Default for RouteSelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSelectionState {
    pub fn new() -> Self {
        let (notifier, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        RouteSelectionState {
            candidates: Vec::new(),
            selected: None,
            notifier,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SelectionChanged> {
        self.notifier.subscribe()
    }

    /// Replace the whole set; the first candidate becomes the selection.
    pub fn set_candidates(&mut self, candidates: Vec<RouteCandidate>) {
        self.selected = if candidates.is_empty() { None } else { Some(0) };
        self.candidates = candidates;
        tracing::debug!(
            candidates = self.candidates.len(),
            selected = ?self.current().map(|c| &c.id),
            "Candidate set replaced"
        );
        self.notify();
    }

    /// Select by id. An unknown id leaves the selection untouched.
    pub fn select(&mut self, id: &str) -> Result<&RouteCandidate> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::UnknownCandidate(id.to_string()))?;

        self.selected = Some(index);
        tracing::debug!(id, "Candidate selected");
        self.notify();
        Ok(&self.candidates[index])
    }

    pub fn current(&self) -> Option<&RouteCandidate> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    /// The first candidate of the set is the source's recommendation.
    pub fn is_recommended(&self, id: &str) -> bool {
        self.candidates.first().is_some_and(|c| c.id == id)
    }

    /// Drop the set, e.g. when the results view is left.
    pub fn clear(&mut self) {
        if self.candidates.is_empty() && self.selected.is_none() {
            return;
        }
        self.candidates.clear();
        self.selected = None;
        self.notify();
    }

    fn notify(&self) {
        // No subscribers is fine: nothing is rendering the list yet.
        let _ = self.notifier.send(SelectionChanged {
            selected: self.current().cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_routes::generate_mock_routes;

    #[test]
    fn test_empty_state_has_no_selection() {
        let state = RouteSelectionState::new();
        assert!(state.current().is_none());
        assert!(state.candidates().is_empty());
    }

    #[test]
    fn test_set_candidates_selects_first() {
        let routes = generate_mock_routes();
        let mut state = RouteSelectionState::new();
        state.set_candidates(routes.clone());

        assert_eq!(state.current(), Some(&routes[0]));
        assert!(state.is_recommended("A"));
        assert!(!state.is_recommended("B"));
    }

    #[test]
    fn test_select_known_id() {
        let mut state = RouteSelectionState::new();
        state.set_candidates(generate_mock_routes());

        let selected = state.select("C").unwrap();
        assert_eq!(selected.name, "City Central");
        assert_eq!(state.current().unwrap().id, "C");
    }

    #[test]
    fn test_select_unknown_id_keeps_selection() {
        let mut state = RouteSelectionState::new();
        state.set_candidates(generate_mock_routes());
        state.select("B").unwrap();

        let err = state.select("Z").unwrap_err();
        assert_eq!(err, AppError::UnknownCandidate("Z".to_string()));
        assert_eq!(state.current().unwrap().id, "B");
    }

    #[test]
    fn test_select_before_any_set_fails() {
        let mut state = RouteSelectionState::new();
        assert!(matches!(state.select("A"), Err(AppError::UnknownCandidate(_))));
        assert!(state.current().is_none());
    }

    #[test]
    fn test_replacing_set_never_keeps_stale_selection() {
        let mut state = RouteSelectionState::new();
        state.set_candidates(generate_mock_routes());
        state.select("C").unwrap();

        let mut next = generate_mock_routes();
        next.truncate(2);
        next[0].id = "X".to_string();
        state.set_candidates(next);

        assert_eq!(state.current().unwrap().id, "X");
        assert!(state.select("C").is_err());
    }

    #[test]
    fn test_empty_set_clears_selection() {
        let mut state = RouteSelectionState::new();
        state.set_candidates(generate_mock_routes());
        state.set_candidates(Vec::new());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_notifications() {
        let mut state = RouteSelectionState::new();
        let mut rx = state.subscribe();

        state.set_candidates(generate_mock_routes());
        state.select("B").unwrap();
        let _ = state.select("missing");
        state.clear();

        let ids: Vec<Option<String>> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| event.selected.map(|c| c.id))
            .collect();
        assert_eq!(
            ids,
            vec![Some("A".to_string()), Some("B".to_string()), None]
        );
    }

    #[test]
    fn test_clear_on_empty_state_is_silent() {
        let mut state = RouteSelectionState::new();
        let mut rx = state.subscribe();
        state.clear();
        assert!(rx.try_recv().is_err());
    }
}
