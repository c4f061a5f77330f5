use serde::{Deserialize, Serialize};

/// Response body of `GET /api/real-time-impact`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealTimeImpact {
    pub live_co2: f64,
    pub efficiency_score: f64,
    pub re_route_flag: bool,
}

/// Query string of `GET /api/real-time-impact`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactQuery {
    pub dist_traveled: f64,
    pub efficiency_rating: f64,
}

impl ImpactQuery {
    pub fn validate(&self) -> Result<(), String> {
        if !self.dist_traveled.is_finite() || self.dist_traveled < 0.0 {
            return Err("dist_traveled must be a non-negative number".to_string());
        }
        if !self.efficiency_rating.is_finite() || self.efficiency_rating < 0.0 {
            return Err("efficiency_rating must be a non-negative number".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleOrigin {
    Remote,
    /// Computed locally because the impact call failed.
    Local,
}

/// One tracking tick. Each sample supersedes the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionSample {
    /// Cumulative distance since tracking started (km)
    pub distance_km: f64,
    pub live_co2_kg: f64,
    /// Efficiency percentage (0-100); only remote samples carry one.
    pub efficiency_score: Option<f64>,
    pub reroute_advised: bool,
    pub origin: SampleOrigin,
}

impl EmissionSample {
    pub fn from_remote(distance_km: f64, impact: RealTimeImpact) -> Self {
        EmissionSample {
            distance_km,
            live_co2_kg: impact.live_co2,
            efficiency_score: Some(impact.efficiency_score),
            reroute_advised: impact.re_route_flag,
            origin: SampleOrigin::Remote,
        }
    }

    pub fn local(distance_km: f64, live_co2_kg: f64) -> Self {
        EmissionSample {
            distance_km,
            live_co2_kg,
            efficiency_score: None,
            reroute_advised: false,
            origin: SampleOrigin::Local,
        }
    }

    /// Text for the live CO2 readout, e.g. `"0.018 kg"`.
    pub fn co2_label(&self) -> String {
        format!("{:.3} kg", self.live_co2_kg)
    }
}
