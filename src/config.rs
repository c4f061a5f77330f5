use crate::constants::*;
use std::env;
use std::time::Duration;

/// What the candidate source does when the planning service cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFallback {
    #[default]
    Surface, // Report RequestFailed to the user, like the browser client does
    Mock, // Substitute the deterministic mock candidates
}

impl std::str::FromStr for PlanFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surface" | "none" => Ok(PlanFallback::Surface),
            "mock" => Ok(PlanFallback::Mock),
            _ => Err(format!(
                "Invalid plan fallback: {}. Use 'surface' or 'mock'",
                s
            )),
        }
    }
}

/// Planning service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Chance (0.0-1.0) that an impact sample advises a re-route
    pub reroute_probability: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: 8000,
            reroute_probability: DEFAULT_REROUTE_PROBABILITY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let reroute_probability: f64 = env::var("REROUTE_PROBABILITY")
            .unwrap_or_else(|_| DEFAULT_REROUTE_PROBABILITY.to_string())
            .parse()
            .map_err(|_| "Invalid REROUTE_PROBABILITY")?;

        if !(0.0..=1.0).contains(&reroute_probability) {
            return Err("REROUTE_PROBABILITY must be between 0 and 1".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            reroute_probability,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Client-side configuration: where the planning service lives and how long
/// to wait for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub plan_timeout: Duration,
    pub sample_timeout: Duration,
    pub tracking_interval: Duration,
    pub plan_fallback: PlanFallback,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            plan_timeout: Duration::from_millis(DEFAULT_PLAN_REQUEST_TIMEOUT_MS),
            sample_timeout: Duration::from_millis(DEFAULT_SAMPLE_TIMEOUT_MS),
            tracking_interval: Duration::from_millis(DEFAULT_TRACKING_INTERVAL_MS),
            plan_fallback: PlanFallback::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let millis = |name: &str, default: u64| -> Result<Duration, String> {
            let value: u64 = env::var(name)
                .unwrap_or_else(|_| default.to_string())
                .parse()
                .map_err(|_| format!("Invalid {}", name))?;
            if value == 0 {
                return Err(format!("{} must be greater than 0", name));
            }
            Ok(Duration::from_millis(value))
        };

        Ok(ClientConfig {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            plan_timeout: millis("PLAN_REQUEST_TIMEOUT_MS", DEFAULT_PLAN_REQUEST_TIMEOUT_MS)?,
            sample_timeout: millis("SAMPLE_TIMEOUT_MS", DEFAULT_SAMPLE_TIMEOUT_MS)?,
            tracking_interval: millis("TRACKING_INTERVAL_MS", DEFAULT_TRACKING_INTERVAL_MS)?,
            plan_fallback: env::var("PLAN_FALLBACK")
                .unwrap_or_else(|_| "surface".to_string())
                .parse()?,
        })
    }
}
