use crate::models::{LocationField, PlaceSelection};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Deserializes through [`FromStr`], so the wire and the form accept the
/// same spellings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum VehicleMode {
    #[default]
    Car,
    Bike,
    Van,
    Truck,
    Bus,
}

impl VehicleMode {
    /// Relative fuel/CO2 load compared to a passenger car.
    pub fn load_multiplier(&self) -> f64 {
        match self {
            VehicleMode::Car => 1.0,
            VehicleMode::Bike => 0.4,
            VehicleMode::Van => 1.5,
            VehicleMode::Truck => 3.5,
            VehicleMode::Bus => 2.5,
        }
    }
}

impl fmt::Display for VehicleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleMode::Car => write!(f, "car"),
            VehicleMode::Bike => write!(f, "bike"),
            VehicleMode::Van => write!(f, "van"),
            VehicleMode::Truck => write!(f, "truck"),
            VehicleMode::Bus => write!(f, "bus"),
        }
    }
}

impl FromStr for VehicleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(VehicleMode::Car),
            "bike" | "motorbike" | "motorcycle" => Ok(VehicleMode::Bike),
            "van" => Ok(VehicleMode::Van),
            "truck" | "lorry" => Ok(VehicleMode::Truck),
            "bus" => Ok(VehicleMode::Bus),
            _ => Err(format!("Invalid vehicle mode: '{}'", s)),
        }
    }
}

/// Fuel types accepted by the planning service. The wire spellings are the
/// service's own (`petrol`, `diesel`, `Electric`, `CNG`); any spelling
/// [`FromStr`] takes is accepted when deserializing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String")]
pub enum FuelType {
    #[default]
    #[serde(rename = "petrol")]
    Petrol,
    #[serde(rename = "diesel")]
    Diesel,
    #[serde(rename = "Electric")]
    Electric,
    #[serde(rename = "CNG")]
    Cng,
}

impl FuelType {
    pub fn is_electric(&self) -> bool {
        matches!(self, FuelType::Electric)
    }

    /// Fuel burned relative to petrol. Electric burns none.
    pub fn fuel_efficiency(&self) -> f64 {
        match self {
            FuelType::Petrol => 1.0,
            FuelType::Diesel => 0.9,
            FuelType::Electric => 0.0,
            FuelType::Cng => 0.7,
        }
    }

    /// Tailpipe CO2 factor: zero for electric, one otherwise.
    pub fn co2_factor(&self) -> f64 {
        if self.is_electric() {
            0.0
        } else {
            1.0
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Petrol => write!(f, "petrol"),
            FuelType::Diesel => write!(f, "diesel"),
            FuelType::Electric => write!(f, "Electric"),
            FuelType::Cng => write!(f, "CNG"),
        }
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "petrol" | "gasoline" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            "electric" | "ev" => Ok(FuelType::Electric),
            "cng" => Ok(FuelType::Cng),
            _ => Err(format!("Invalid fuel type: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OptimizationPriority {
    #[default]
    Time,
    Cost,
    Eco,
}

impl fmt::Display for OptimizationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationPriority::Time => write!(f, "time"),
            OptimizationPriority::Cost => write!(f, "cost"),
            OptimizationPriority::Eco => write!(f, "eco"),
        }
    }
}

impl FromStr for OptimizationPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" | "fastest" => Ok(OptimizationPriority::Time),
            "cost" | "cheapest" => Ok(OptimizationPriority::Cost),
            "eco" | "emissions" => Ok(OptimizationPriority::Eco),
            _ => Err(format!("Invalid optimization priority: '{}'", s)),
        }
    }
}

impl TryFrom<String> for VehicleMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for FuelType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for OptimizationPriority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A trip endpoint: the text the user entered and, if they picked one, the
/// geocoded place. On the wire it is a plain string.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub text: String,
    pub place: Option<PlaceSelection>,
}

impl Location {
    pub fn text(text: impl Into<String>) -> Self {
        Location {
            text: text.into(),
            place: None,
        }
    }

    /// String sent to the planning service: the resolved address when a
    /// place is attached, otherwise the raw text verbatim.
    pub fn wire_text(&self) -> &str {
        match self.place {
            Some(ref place) => &place.formatted_address,
            None => &self.text,
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_text())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Location::text)
    }
}

/// A validated trip request, as posted to `/api/plan-route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_location: Location,
    pub end_location: Location,
    pub vehicle_mode: VehicleMode,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub cargo_weight: f64,
    #[serde(default)]
    pub optimization_priority: OptimizationPriority,
    #[serde(default)]
    pub traffic_enabled: bool,
    #[serde(default)]
    pub reroute_enabled: bool,
}

impl RouteRequest {
    pub fn location(&self, field: LocationField) -> &Location {
        match field {
            LocationField::Start => &self.start_location,
            LocationField::End => &self.end_location,
        }
    }

    /// Server-side validation. Requests assembled by the builder always pass.
    pub fn validate(&self) -> Result<(), String> {
        if !self.cargo_weight.is_finite() || self.cargo_weight < 0.0 {
            return Err("cargo_weight must be a non-negative number".to_string());
        }
        if self.start_location.wire_text().trim().is_empty() {
            return Err("start_location must not be empty".to_string());
        }
        if self.end_location.wire_text().trim().is_empty() {
            return Err("end_location must not be empty".to_string());
        }
        Ok(())
    }
}

/// Unvalidated form values, exactly as the presentation layer holds them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTripFields {
    #[serde(default)]
    pub start_location: String,
    #[serde(default)]
    pub start_place: Option<PlaceSelection>,
    #[serde(default)]
    pub end_location: String,
    #[serde(default)]
    pub end_place: Option<PlaceSelection>,
    #[serde(default)]
    pub vehicle_mode: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub cargo_weight: String,
    #[serde(default)]
    pub optimization_priority: Option<String>,
    #[serde(default)]
    pub traffic_enabled: bool,
    #[serde(default)]
    pub reroute_enabled: bool,
}
