use crate::models::{
    FuelType, Location, LocationField, OptimizationPriority, PlaceSelection, RawTripFields,
    RouteRequest, VehicleMode,
};
use std::fmt;
use std::str::FromStr;

/// A single form field that could not be used as entered and was replaced by
/// its default. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDegraded {
    pub field: &'static str,
    pub raw_value: String,
    pub substituted: String,
}

impl fmt::Display for ValidationDegraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' replaced by '{}'",
            self.field, self.raw_value, self.substituted
        )
    }
}

/// Assembles [`RouteRequest`]s from raw form values. Building cannot fail.
pub struct RouteRequestBuilder;

impl RouteRequestBuilder {
    pub fn build(raw: &RawTripFields) -> RouteRequest {
        let (request, degraded) = Self::build_with_report(raw);
        for note in &degraded {
            tracing::warn!(field = note.field, "Trip field degraded to default: {}", note);
        }
        request
    }

    /// Like [`build`](Self::build), also returning every field that fell back
    /// to its default.
    pub fn build_with_report(raw: &RawTripFields) -> (RouteRequest, Vec<ValidationDegraded>) {
        let mut degraded = Vec::new();

        let vehicle_mode =
            parse_or_default::<VehicleMode>("vehicle_mode", &raw.vehicle_mode, &mut degraded);
        let fuel_type = parse_or_default::<FuelType>("fuel_type", &raw.fuel_type, &mut degraded);
        let optimization_priority = match raw.optimization_priority.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_or_default::<OptimizationPriority>(
                "optimization_priority",
                value,
                &mut degraded,
            ),
            _ => OptimizationPriority::default(),
        };
        let cargo_weight = parse_cargo_weight(&raw.cargo_weight, &mut degraded);

        let request = RouteRequest {
            start_location: location(
                LocationField::Start,
                &raw.start_location,
                raw.start_place.as_ref(),
                &mut degraded,
            ),
            end_location: location(
                LocationField::End,
                &raw.end_location,
                raw.end_place.as_ref(),
                &mut degraded,
            ),
            vehicle_mode,
            fuel_type,
            cargo_weight,
            optimization_priority,
            traffic_enabled: raw.traffic_enabled,
            reroute_enabled: raw.reroute_enabled,
        };

        (request, degraded)
    }
}

/// A place without an address can't be sent; it is dropped so the typed
/// text (or the placeholder) goes on the wire instead.
fn location(
    field: LocationField,
    text: &str,
    place: Option<&PlaceSelection>,
    degraded: &mut Vec<ValidationDegraded>,
) -> Location {
    let text = text.trim();
    let text = if text.is_empty() {
        field.placeholder().to_string()
    } else {
        text.to_string()
    };

    let place = match place {
        Some(place) if place.formatted_address.trim().is_empty() => {
            degraded.push(ValidationDegraded {
                field: match field {
                    LocationField::Start => "start_place",
                    LocationField::End => "end_place",
                },
                raw_value: place.formatted_address.clone(),
                substituted: text.clone(),
            });
            None
        }
        other => other.cloned(),
    };

    Location { text, place }
}

fn parse_or_default<T>(field: &'static str, raw: &str, degraded: &mut Vec<ValidationDegraded>) -> T
where
    T: FromStr + Default + fmt::Display,
{
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            let value = T::default();
            degraded.push(ValidationDegraded {
                field,
                raw_value: raw.to_string(),
                substituted: value.to_string(),
            });
            value
        }
    }
}

/// Empty input is an unset weight, not a degradation.
fn parse_cargo_weight(raw: &str, degraded: &mut Vec<ValidationDegraded>) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => weight,
        _ => {
            degraded.push(ValidationDegraded {
                field: "cargo_weight",
                raw_value: raw.to_string(),
                substituted: "0".to_string(),
            });
            0.0
        }
    }
}
