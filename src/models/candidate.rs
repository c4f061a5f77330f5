use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lowercase form used for styling hooks (`risk-low`, ...).
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::Medium => "risk-medium",
            RiskLevel::High => "risk-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// One proposed route option.
///
/// Serialized with the short field names the browser client reads
/// (`dist`, `fuel`, `co2`, ...). The long names some service builds emit
/// (`distance`, `fuel_used`, ...) are accepted when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub id: String,
    pub name: String,
    /// Minutes
    pub eta: u32,
    /// Kilometers
    #[serde(alias = "distance")]
    pub dist: f64,
    /// Liters
    #[serde(alias = "fuel_used")]
    pub fuel: f64,
    /// Kilograms
    #[serde(alias = "co2_emissions")]
    pub co2: f64,
    #[serde(alias = "risk_score")]
    pub risk: RiskLevel,
    /// Evaluation score (0-100)
    #[serde(alias = "evaluation_score")]
    pub score: u8,
    #[serde(alias = "cost_estimate")]
    pub cost: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl RouteCandidate {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Heading of the explanation panel.
    pub fn explanation_heading(&self) -> String {
        format!("Why {}?", self.name)
    }

    pub fn eta_label(&self) -> String {
        format!("{} mins", self.eta)
    }

    pub fn distance_label(&self) -> String {
        format!("{:.1} km", self.dist)
    }

    /// Parsed display cost, e.g. `"$12.40"` -> `12.40`.
    pub fn cost_value(&self) -> Option<f64> {
        self.cost
            .trim()
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .parse()
            .ok()
    }
}

/// Returns the first identifier that appears more than once, if any.
pub fn find_duplicate_id(candidates: &[RouteCandidate]) -> Option<&str> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .map(|c| c.id.as_str())
        .find(|id| !seen.insert(*id))
}
