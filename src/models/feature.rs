use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared on/off switch owned by the presentation layer (a toggle or a
/// visible panel) and read by background tasks.
#[derive(Debug, Clone, Default)]
pub struct FeatureFlag(Arc<AtomicBool>);

impl FeatureFlag {
    pub fn new(enabled: bool) -> Self {
        FeatureFlag(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn enable(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
