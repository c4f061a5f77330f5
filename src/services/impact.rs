use crate::constants::{IMPACT_CO2_KG_PER_KM, IMPACT_EFFICIENCY_SCORE};
use crate::models::RealTimeImpact;

/// Live carbon figures behind `/api/real-time-impact`.
#[derive(Debug, Clone)]
pub struct ImpactEstimator {
    reroute_probability: f64,
}

impl ImpactEstimator {
    pub fn new(reroute_probability: f64) -> Self {
        ImpactEstimator {
            reroute_probability: reroute_probability.clamp(0.0, 1.0),
        }
    }

    /// CO2 for the distance covered at the given efficiency rating, rounded
    /// to grams. The re-route advisory is raised at random.
    pub fn estimate(&self, dist_traveled: f64, efficiency_rating: f64) -> RealTimeImpact {
        let co2_per_km = IMPACT_CO2_KG_PER_KM * efficiency_rating;
        let live_co2 = ((dist_traveled * co2_per_km) * 1000.0).round() / 1000.0;

        RealTimeImpact {
            live_co2,
            efficiency_score: IMPACT_EFFICIENCY_SCORE,
            re_route_flag: rand::random::<f64>() < self.reroute_probability,
        }
    }
}
