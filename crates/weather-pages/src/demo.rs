//! Static demo dataset for the quick-location buttons.
//!
//! Lookup is keyed by the exact `(lat, lon)` pair of each document's
//! location. Anything else is a miss and the caller falls back to the
//! network source.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::model::{Coordinates, WeatherDocument};

const DEMO_DATASET: &str = include_str!("../data/demo_weather.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickLocation {
    Washington,
    NewYork,
    LosAngeles,
    Chicago,
}

impl QuickLocation {
    pub const ALL: [Self; 4] = [
        Self::Washington,
        Self::NewYork,
        Self::LosAngeles,
        Self::Chicago,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Washington => "washington",
            Self::NewYork => "new-york",
            Self::LosAngeles => "los-angeles",
            Self::Chicago => "chicago",
        }
    }

    pub fn coordinates(self) -> Coordinates {
        let (lat, lon) = match self {
            Self::Washington => (38.8894, -77.0352),
            Self::NewYork => (40.7128, -74.0060),
            Self::LosAngeles => (34.0522, -118.2437),
            Self::Chicago => (41.8781, -87.6298),
        };
        Coordinates { lat, lon }
    }
}

pub fn parse_dataset(raw: &str) -> Result<BTreeMap<String, WeatherDocument>, serde_json::Error> {
    serde_json::from_str(raw)
}

fn dataset() -> &'static BTreeMap<String, WeatherDocument> {
    static DATASET: OnceLock<BTreeMap<String, WeatherDocument>> = OnceLock::new();
    DATASET.get_or_init(|| {
        parse_dataset(DEMO_DATASET).unwrap_or_else(|error| {
            tracing::error!(%error, "embedded demo dataset is unreadable; every lookup will miss");
            BTreeMap::new()
        })
    })
}

/// Exact floating-point match on both coordinates, no tolerance.
pub fn lookup(lat: f64, lon: f64) -> Option<WeatherDocument> {
    dataset()
        .values()
        .find(|document| {
            document
                .location
                .as_ref()
                .is_some_and(|location| location.lat == Some(lat) && location.lon == Some(lon))
        })
        .cloned()
}
