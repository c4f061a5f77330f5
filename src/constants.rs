//! Stable application-wide constants.
//!
//! Values here are simulation coefficients, wire defaults, and fallbacks for
//! env-var-based configuration. They should rarely change.
//! Runtime-tunable values live in [`Config`](crate::config::Config) and
//! [`ClientConfig`](crate::config::ClientConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the planning service.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the planning service.
pub const DEFAULT_PORT: &str = "8000";
/// Probability that an impact sample carries a re-route advisory.
/// Overridden by `REROUTE_PROBABILITY`.
pub const DEFAULT_REROUTE_PROBABILITY: f64 = 0.1;

// --- Client defaults ---

/// Planning service the client talks to when `API_BASE_URL` is absent.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Upper bound on a plan-route call. Overridden by `PLAN_REQUEST_TIMEOUT_MS`.
pub const DEFAULT_PLAN_REQUEST_TIMEOUT_MS: u64 = 5_000;
/// Upper bound on a real-time-impact call. Kept below the tracking period so
/// one slow sample never runs into the next tick. Overridden by `SAMPLE_TIMEOUT_MS`.
pub const DEFAULT_SAMPLE_TIMEOUT_MS: u64 = 800;
/// Tracking tick period. Overridden by `TRACKING_INTERVAL_MS`.
pub const DEFAULT_TRACKING_INTERVAL_MS: u64 = 1_000;

// --- Request placeholders ---

/// Start location sent when the start field is left empty.
pub const START_LOCATION_PLACEHOLDER: &str = "Current Location";
/// End location sent when the end field is left empty.
pub const END_LOCATION_PLACEHOLDER: &str = "Target Warehouse";
/// Inline message shown when an autocomplete field has no resolved place.
pub const PLACE_UNRESOLVED_MESSAGE: &str = "Please select a location from the dropdown.";

// --- Emission tracking ---

/// Simulated movement per tracking tick (km), i.e. 50 m.
pub const TRACKING_STEP_KM: f64 = 0.05;
/// Efficiency rating reported with every impact sample request.
pub const TRACKING_EFFICIENCY_RATING: f64 = 1.0;
/// CO2 (kg) per km used for the local estimate when the impact call fails.
pub const LOCAL_CO2_KG_PER_KM: f64 = 0.12;
/// How long a re-route alert stays raised before reverting (ms).
pub const REROUTE_ALERT_DURATION_MS: u64 = 2_000;

// --- Degraded-path mock generator baselines ---

/// Baseline ETA (minutes) the mock candidates are derived from.
pub const MOCK_BASE_ETA_MINUTES: f64 = 45.0;
/// Baseline distance (km) the mock candidates are derived from.
pub const MOCK_BASE_DISTANCE_KM: f64 = 12.5;

// --- Planning service simulation ---

/// Baseline trip distance (km) for simulated plans.
pub const PLAN_BASE_DISTANCE_KM: f64 = 15.4;
/// Baseline trip time (minutes) for simulated plans.
pub const PLAN_BASE_TIME_MINUTES: f64 = 35.0;
/// Cargo weight (kg) that doubles the ETA. ETA scales by `1 + weight / this`.
pub const CARGO_IMPACT_DIVISOR_KG: f64 = 5_000.0;
/// CO2 (kg) per km at efficiency rating 1.0 reported by the impact endpoint.
pub const IMPACT_CO2_KG_PER_KM: f64 = 0.12;
/// Efficiency score reported by the impact endpoint.
pub const IMPACT_EFFICIENCY_SCORE: f64 = 98.4;
