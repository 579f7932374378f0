use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::demo::QuickLocation;

/// Weather document as returned by `/weather` (and stored in the demo set).
///
/// Every field is optional: a sparse document is still accepted and each
/// missing value gets a page-specific placeholder at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDocument {
    pub location: Option<LocationRecord>,
    pub current: Option<PeriodRecord>,
    pub forecast: Option<Vec<PeriodRecord>>,
    pub hourly: Option<Vec<PeriodRecord>>,
    pub alerts: Option<Vec<AlertRecord>>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub grid_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub is_daytime: Option<bool>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub short_forecast: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub relative_humidity: Option<Measurement>,
    pub dewpoint: Option<Measurement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub event: Option<String>,
    pub headline: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn from_symbol(raw: &str) -> Option<Self> {
        match raw.trim().trim_start_matches('°') {
            "F" | "f" => Some(Self::Fahrenheit),
            "C" | "c" => Some(Self::Celsius),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }
}

/// One forecast or hourly entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherPeriod {
    pub name: Option<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<TemperatureUnit>,
    pub condition: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub humidity: Option<f64>,
    pub is_daytime: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub period: WeatherPeriod,
    pub dewpoint_c: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Extreme,
    Unknown,
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minor" => Self::Minor,
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            "extreme" => Self::Extreme,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Extreme => "extreme",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub severity: Option<Severity>,
    pub urgency: Option<String>,
    pub event: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    pub location: Location,
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<WeatherPeriod>,
    pub hourly: Vec<WeatherPeriod>,
    pub alerts: Vec<Alert>,
}

/// A discrete user action on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    /// Quick-location button: demo dataset first, network on a miss.
    QuickLocation(QuickLocation),
    /// Coordinate form submit: always the network source.
    SubmitCoordinates(Coordinates),
}

impl UserAction {
    pub fn new(
        quick: Option<QuickLocation>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let has_coords = lat.is_some() || lon.is_some();

        if quick.is_some() && has_coords {
            return Err(ValidationError::ConflictingLocationInput);
        }

        match (quick, lat, lon) {
            (Some(location), None, None) => Ok(Self::QuickLocation(location)),
            (None, Some(lat), Some(lon)) => {
                validate_coordinates(lat, lon)?;
                Ok(Self::SubmitCoordinates(Coordinates { lat, lon }))
            }
            (None, None, None) => Err(ValidationError::MissingLocationInput),
            _ => Err(ValidationError::PartialCoordinates),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        match self {
            Self::QuickLocation(location) => location.coordinates(),
            Self::SubmitCoordinates(coordinates) => *coordinates,
        }
    }
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !((-90.0)..=90.0).contains(&lat) {
        return Err(ValidationError::InvalidLatitude(lat));
    }
    if !((-180.0)..=180.0).contains(&lon) {
        return Err(ValidationError::InvalidLongitude(lon));
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing location input: use --quick or --lat/--lon")]
    MissingLocationInput,
    #[error("partial coordinates: provide both --lat and --lon")]
    PartialCoordinates,
    #[error("conflicting location input: use either --quick or --lat/--lon")]
    ConflictingLocationInput,
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_action_accepts_quick_location() {
        let action = UserAction::new(Some(QuickLocation::Chicago), None, None).expect("action");

        assert_eq!(action, UserAction::QuickLocation(QuickLocation::Chicago));
        assert_eq!(
            action.coordinates(),
            Coordinates {
                lat: 41.8781,
                lon: -87.6298
            }
        );
    }

    #[test]
    fn model_action_accepts_coordinates() {
        let action = UserAction::new(None, Some(25.03), Some(121.56)).expect("action");

        assert!(matches!(action, UserAction::SubmitCoordinates(_)));
    }

    #[test]
    fn model_rejects_missing_location_input() {
        let err = UserAction::new(None, None, None).expect_err("must fail");
        assert_eq!(err, ValidationError::MissingLocationInput);
    }

    #[test]
    fn model_rejects_partial_coordinates() {
        let err = UserAction::new(None, Some(25.0), None).expect_err("must fail");
        assert_eq!(err, ValidationError::PartialCoordinates);
    }

    #[test]
    fn model_rejects_conflicting_location_input() {
        let err = UserAction::new(Some(QuickLocation::Washington), Some(38.8894), None)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::ConflictingLocationInput);
    }

    #[test]
    fn model_rejects_out_of_range_coordinates() {
        assert_eq!(
            UserAction::new(None, Some(100.0), Some(0.0)).expect_err("must fail"),
            ValidationError::InvalidLatitude(100.0)
        );
        assert_eq!(
            UserAction::new(None, Some(0.0), Some(190.0)).expect_err("must fail"),
            ValidationError::InvalidLongitude(190.0)
        );
    }

    #[test]
    fn model_document_accepts_sparse_payload() {
        let doc: WeatherDocument =
            serde_json::from_str(r#"{"location":{"lat":1.5,"lon":2.5},"alerts":null}"#)
                .expect("parse");

        assert_eq!(doc.current, None);
        assert_eq!(doc.alerts, None);
        assert_eq!(doc.location.and_then(|location| location.lat), Some(1.5));
    }

    #[test]
    fn model_temperature_unit_accepts_symbols() {
        assert_eq!(
            TemperatureUnit::from_symbol("F"),
            Some(TemperatureUnit::Fahrenheit)
        );
        assert_eq!(
            TemperatureUnit::from_symbol("°C"),
            Some(TemperatureUnit::Celsius)
        );
        assert_eq!(TemperatureUnit::from_symbol("K"), None);
    }

    #[test]
    fn model_severity_parses_case_insensitively() {
        assert_eq!(Severity::parse("Severe"), Severity::Severe);
        assert_eq!(Severity::parse("EXTREME"), Severity::Extreme);
        assert_eq!(Severity::parse("whatever"), Severity::Unknown);
    }
}
