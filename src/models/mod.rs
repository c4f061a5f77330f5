pub mod candidate;
pub mod coordinates;
pub mod emission;
pub mod feature;
pub mod place;
pub mod request;

pub use candidate::{RiskLevel, RouteCandidate};
pub use coordinates::Coordinates;
pub use emission::{EmissionSample, ImpactQuery, RealTimeImpact, SampleOrigin};
pub use feature::FeatureFlag;
pub use place::{AutocompleteResult, LocationField, LocationInput, PlaceSelection};
pub use request::{
    FuelType, Location, OptimizationPriority, RawTripFields, RouteRequest, VehicleMode,
};
