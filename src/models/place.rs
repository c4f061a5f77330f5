use crate::constants::{END_LOCATION_PLACEHOLDER, START_LOCATION_PLACEHOLDER};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two address inputs of the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationField {
    Start,
    End,
}

impl LocationField {
    /// Text sent in place of an empty field.
    pub fn placeholder(&self) -> &'static str {
        match self {
            LocationField::Start => START_LOCATION_PLACEHOLDER,
            LocationField::End => END_LOCATION_PLACEHOLDER,
        }
    }
}

impl fmt::Display for LocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationField::Start => write!(f, "start"),
            LocationField::End => write!(f, "end"),
        }
    }
}

/// A geocoded place the user picked from the autocomplete dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub formatted_address: String,
    pub coordinates: Coordinates,
    /// Opaque identifier issued by the geocoder.
    pub place_id: String,
}

/// Raw payload of an autocomplete `place_changed` event.
///
/// The widget reports a result even when the user pressed enter without
/// choosing a suggestion; such results carry no geometry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteResult {
    pub formatted_address: Option<String>,
    pub name: Option<String>,
    pub place_id: Option<String>,
    pub geometry: Option<Coordinates>,
}

impl AutocompleteResult {
    fn into_place(self) -> Option<PlaceSelection> {
        let geometry = self.geometry?;
        let coordinates = Coordinates::new(geometry.lat, geometry.lng).ok()?;
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        let formatted_address = non_blank(self.formatted_address).or(non_blank(self.name))?;
        Some(PlaceSelection {
            formatted_address,
            coordinates,
            place_id: self.place_id.unwrap_or_default(),
        })
    }
}

/// One address input: what the user typed plus the place they resolved, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInput {
    field: LocationField,
    text: String,
    place: Option<PlaceSelection>,
}

impl LocationInput {
    pub fn new(field: LocationField) -> Self {
        LocationInput {
            field,
            text: String::new(),
            place: None,
        }
    }

    pub fn field(&self) -> LocationField {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn place(&self) -> Option<&PlaceSelection> {
        self.place.as_ref()
    }

    /// Free-text edit. Any previously resolved place no longer matches the
    /// input and is dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.place = None;
    }

    /// Apply an autocomplete selection.
    ///
    /// On success the input text becomes the place's address. A result
    /// without geometry clears the field's place and reports
    /// [`AppError::PlaceUnresolved`]; the raw text is kept and will be sent
    /// verbatim.
    pub fn apply_autocomplete(&mut self, result: AutocompleteResult) -> Result<&PlaceSelection> {
        match result.into_place() {
            Some(place) => {
                tracing::debug!(
                    field = %self.field,
                    address = %place.formatted_address,
                    coordinates = %place.coordinates,
                    "Place resolved"
                );
                self.text = place.formatted_address.clone();
                Ok(&*self.place.insert(place))
            }
            None => {
                tracing::debug!(field = %self.field, "Autocomplete result has no geometry");
                self.place = None;
                Err(AppError::PlaceUnresolved(self.field))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(address: &str) -> AutocompleteResult {
        AutocompleteResult {
            formatted_address: Some(address.to_string()),
            name: None,
            place_id: Some("ChIJ123".to_string()),
            geometry: Some(Coordinates::new(12.9716, 77.5946).unwrap()),
        }
    }

    #[test]
    fn test_autocomplete_with_geometry_resolves_place() {
        let mut input = LocationInput::new(LocationField::Start);
        input.set_text("Bang");

        let place = input.apply_autocomplete(resolved("Bengaluru, Karnataka, India")).unwrap();
        assert_eq!(place.place_id, "ChIJ123");
        assert_eq!(input.text(), "Bengaluru, Karnataka, India");
        assert!(input.place().is_some());
    }

    #[test]
    fn test_autocomplete_without_geometry_is_unresolved() {
        let mut input = LocationInput::new(LocationField::End);
        input.apply_autocomplete(resolved("Mysuru")).unwrap();
        input.set_text("Somewhere vague");

        let result = input.apply_autocomplete(AutocompleteResult {
            name: Some("Somewhere vague".to_string()),
            ..Default::default()
        });

        assert_eq!(result.unwrap_err(), AppError::PlaceUnresolved(LocationField::End));
        assert!(input.place().is_none());
        assert_eq!(input.text(), "Somewhere vague");
    }

    #[test]
    fn test_name_used_when_address_missing() {
        let mut input = LocationInput::new(LocationField::Start);
        let result = AutocompleteResult {
            formatted_address: None,
            name: Some("Central Depot".to_string()),
            place_id: None,
            geometry: Some(Coordinates::new(1.0, 2.0).unwrap()),
        };

        let place = input.apply_autocomplete(result).unwrap();
        assert_eq!(place.formatted_address, "Central Depot");
        assert_eq!(place.place_id, "");
    }

    #[test]
    fn test_out_of_range_geometry_is_unresolved() {
        let json = r#"{"formatted_address":"X","geometry":{"lat":500.0,"lng":-999.0}}"#;
        assert!(serde_json::from_str::<AutocompleteResult>(json).is_err());

        let mut input = LocationInput::new(LocationField::Start);
        let result = input.apply_autocomplete(AutocompleteResult {
            formatted_address: Some("X".to_string()),
            geometry: Some(Coordinates { lat: 500.0, lng: -999.0 }),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), AppError::PlaceUnresolved(LocationField::Start));
        assert!(input.place().is_none());
    }

    #[test]
    fn test_blank_address_falls_back_to_name() {
        let mut input = LocationInput::new(LocationField::End);
        let place = input
            .apply_autocomplete(AutocompleteResult {
                formatted_address: Some("  ".to_string()),
                name: Some("North Yard".to_string()),
                geometry: Some(Coordinates::new(12.9, 77.5).unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(place.formatted_address, "North Yard");

        let result = input.apply_autocomplete(AutocompleteResult {
            formatted_address: Some(String::new()),
            geometry: Some(Coordinates::new(12.9, 77.5).unwrap()),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), AppError::PlaceUnresolved(LocationField::End));
    }

    #[test]
    fn test_editing_text_drops_place() {
        let mut input = LocationInput::new(LocationField::Start);
        input.apply_autocomplete(resolved("Chennai")).unwrap();
        input.set_text("Chennai Port");
        assert!(input.place().is_none());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(LocationField::Start.placeholder(), "Current Location");
        assert_eq!(LocationField::End.placeholder(), "Target Warehouse");
    }
}
