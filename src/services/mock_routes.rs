//! Deterministic stand-in candidates for when no planning service answers.
//!
//! Three route characters are derived from a fixed baseline ETA and
//! distance. The output depends on nothing but the constants below, so it is
//! stable across calls and suitable for golden tests.

use crate::constants::{MOCK_BASE_DISTANCE_KM, MOCK_BASE_ETA_MINUTES};
use crate::models::{RiskLevel, RouteCandidate};

struct MockProfile {
    id: &'static str,
    name: &'static str,
    eta_factor: f64,
    /// Minutes added after scaling
    eta_offset: f64,
    distance_factor: f64,
    fuel: f64,
    co2: f64,
    risk: RiskLevel,
    score: u8,
    cost: &'static str,
    labels: &'static [&'static str],
    explanation: &'static str,
}

const MOCK_PROFILES: [MockProfile; 3] = [
    // Fastest: highway bypass
    MockProfile {
        id: "A",
        name: "Express Highway 4",
        eta_factor: 0.9,
        eta_offset: 0.0,
        distance_factor: 1.2,
        fuel: 3.2,
        co2: 1.1,
        risk: RiskLevel::Low,
        score: 94,
        cost: "$12.40",
        labels: &["Fastest"],
        explanation: "Avoids suburban traffic with high-speed bypass.",
    },
    // Balanced: coastal road
    MockProfile {
        id: "B",
        name: "Coastal Road",
        eta_factor: 1.0,
        eta_offset: 5.0,
        distance_factor: 0.95,
        fuel: 2.8,
        co2: 0.8,
        risk: RiskLevel::Medium,
        score: 88,
        cost: "$10.20",
        labels: &["Cheapest", "Eco"],
        explanation: "Minimum elevation gain results in optimal fuel usage.",
    },
    // Shortest but congested
    MockProfile {
        id: "C",
        name: "City Central",
        eta_factor: 1.0,
        eta_offset: 15.0,
        distance_factor: 0.8,
        fuel: 3.8,
        co2: 1.5,
        risk: RiskLevel::High,
        score: 65,
        cost: "$14.10",
        labels: &[],
        explanation: "Shortest path but heavily impacted by gridlock.",
    },
];

/// The three mock candidates, recommended first.
pub fn generate_mock_routes() -> Vec<RouteCandidate> {
    MOCK_PROFILES
        .iter()
        .map(|profile| RouteCandidate {
            id: profile.id.to_string(),
            name: profile.name.to_string(),
            eta: (MOCK_BASE_ETA_MINUTES * profile.eta_factor + profile.eta_offset).round() as u32,
            dist: MOCK_BASE_DISTANCE_KM * profile.distance_factor,
            fuel: profile.fuel,
            co2: profile.co2,
            risk: profile.risk,
            score: profile.score,
            cost: profile.cost.to_string(),
            labels: profile.labels.iter().map(|l| l.to_string()).collect(),
            explanation: profile.explanation.to_string(),
        })
        .collect()
}
