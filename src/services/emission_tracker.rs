use crate::config::ClientConfig;
use crate::constants::{
    DEFAULT_TRACKING_INTERVAL_MS, LOCAL_CO2_KG_PER_KM, REROUTE_ALERT_DURATION_MS,
    TRACKING_EFFICIENCY_RATING, TRACKING_STEP_KM,
};
use crate::error::Result;
use crate::models::{EmissionSample, FeatureFlag, FuelType, RealTimeImpact};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const EVENT_CAPACITY: usize = 64;

/// Where live impact figures come from.
#[async_trait]
pub trait ImpactSource: Send + Sync {
    async fn fetch_impact(&self, dist_traveled: f64, efficiency_rating: f64)
        -> Result<RealTimeImpact>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Sample(EmissionSample),
    /// The service advised a re-route and the user has re-routing enabled.
    RerouteDetected,
    /// The re-route alert has been shown long enough.
    RerouteCleared,
    /// Tracking ended on its own because the tracker panel was switched off.
    Deactivated,
}

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub interval: Duration,
    pub step_km: f64,
    pub efficiency_rating: f64,
    pub alert_duration: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            interval: Duration::from_millis(DEFAULT_TRACKING_INTERVAL_MS),
            step_km: TRACKING_STEP_KM,
            efficiency_rating: TRACKING_EFFICIENCY_RATING,
            alert_duration: Duration::from_millis(REROUTE_ALERT_DURATION_MS),
        }
    }
}

impl From<&ClientConfig> for TrackerSettings {
    fn from(config: &ClientConfig) -> Self {
        TrackerSettings {
            interval: config.tracking_interval,
            ..TrackerSettings::default()
        }
    }
}

/// CO2 estimate used when the impact service does not answer.
pub fn local_co2_estimate(distance_km: f64, fuel_type: FuelType) -> f64 {
    let per_km = if fuel_type.is_electric() {
        0.0
    } else {
        LOCAL_CO2_KG_PER_KM
    };
    distance_km * per_km
}

struct TrackingRun {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Live carbon tracker: Idle until [`start`](Self::start), then one sample
/// per interval until [`stop`](Self::stop) or until the `active` flag is
/// switched off. At most one tracking loop exists at a time.
///
/// Failed samples never end tracking; they are replaced by a local estimate.
/// A raised re-route alert always reverts after its duration, even if the run
/// that raised it has been stopped or replaced.
pub struct EmissionTracker {
    source: Arc<dyn ImpactSource>,
    settings: TrackerSettings,
    active: FeatureFlag,
    reroute: FeatureFlag,
    events: broadcast::Sender<TrackerEvent>,
    /// Bumped on every alert; only the newest alert's timer clears it.
    alert_generation: Arc<AtomicU64>,
    run: Option<TrackingRun>,
}

impl EmissionTracker {
    pub fn new(
        source: Arc<dyn ImpactSource>,
        settings: TrackerSettings,
        active: FeatureFlag,
        reroute: FeatureFlag,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        EmissionTracker {
            source,
            settings,
            active,
            reroute,
            events,
            alert_generation: Arc::new(AtomicU64::new(0)),
            run: None,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    /// Governs whether tracking may continue; checked at every tick.
    pub fn active_flag(&self) -> &FeatureFlag {
        &self.active
    }

    /// The user's re-route toggle; alerts are only raised while it is on.
    pub fn reroute_flag(&self) -> &FeatureFlag {
        &self.reroute
    }

    pub fn is_tracking(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.token.is_cancelled() && !run.handle.is_finished())
    }

    /// Begin a fresh run with distance reset to zero, replacing any run in
    /// progress. Must be called from within a tokio runtime.
    pub fn start(&mut self, fuel_type: FuelType) {
        self.stop();
        self.active.enable();

        let token = CancellationToken::new();
        let tracking = TrackingLoop {
            source: self.source.clone(),
            settings: self.settings.clone(),
            fuel_type,
            active: self.active.clone(),
            reroute: self.reroute.clone(),
            events: self.events.clone(),
            alert_generation: self.alert_generation.clone(),
        };

        tracing::info!(fuel = %fuel_type, interval_ms = self.settings.interval.as_millis() as u64, "Emission tracking started");
        let handle = tokio::spawn(tracking.run(token.clone()));
        self.run = Some(TrackingRun { token, handle });
    }

    /// Cancel the current run, if any. A sample still in flight is dropped
    /// and the loop emits nothing once it observes the cancellation. A
    /// pending re-route alert still reverts on schedule.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            tracing::info!("Emission tracking stopped");
        }
    }
}

impl Drop for EmissionTracker {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
        }
    }
}

struct TrackingLoop {
    source: Arc<dyn ImpactSource>,
    settings: TrackerSettings,
    fuel_type: FuelType,
    active: FeatureFlag,
    reroute: FeatureFlag,
    events: broadcast::Sender<TrackerEvent>,
    alert_generation: Arc<AtomicU64>,
}

impl TrackingLoop {
    async fn run(self, token: CancellationToken) {
        let period = self.settings.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut distance_km = 0.0;

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => return,

                _ = ticker.tick() => {
                    if !self.active.is_enabled() {
                        tracing::info!(distance_km, "Tracker deactivated, ending tracking");
                        self.emit(&token, TrackerEvent::Deactivated);
                        return;
                    }

                    distance_km += self.settings.step_km;

                    let fetched = tokio::select! {
                        biased;
                        _ = token.cancelled() => return,
                        result = self.source.fetch_impact(distance_km, self.settings.efficiency_rating) => result,
                    };

                    match fetched {
                        Ok(impact) => {
                            let sample = EmissionSample::from_remote(distance_km, impact);
                            self.emit(&token, TrackerEvent::Sample(sample));

                            if impact.re_route_flag && self.reroute.is_enabled() && !token.is_cancelled() {
                                tracing::info!(distance_km, "Re-routing detected");
                                self.raise_alert();
                            }
                        }
                        Err(e) => {
                            tracing::debug!(distance_km, "Impact sample failed, using local estimate: {}", e);
                            let co2 = local_co2_estimate(distance_km, self.fuel_type);
                            self.emit(&token, TrackerEvent::Sample(EmissionSample::local(distance_km, co2)));
                        }
                    }
                }
            }
        }
    }

    fn emit(&self, token: &CancellationToken, event: TrackerEvent) {
        if !token.is_cancelled() {
            let _ = self.events.send(event);
        }
    }

    /// Emit `RerouteDetected` and schedule its revert on a timer of its own,
    /// so stopping or restarting the tracker can't leave the alert up.
    fn raise_alert(&self) {
        let generation = self.alert_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.events.send(TrackerEvent::RerouteDetected);

        let latest = self.alert_generation.clone();
        let events = self.events.clone();
        let duration = self.settings.alert_duration;
        tokio::spawn(async move {
            sleep(duration).await;
            // A newer alert owns the revert
            if latest.load(Ordering::SeqCst) == generation {
                let _ = events.send(TrackerEvent::RerouteCleared);
            }
        });
    }
}
