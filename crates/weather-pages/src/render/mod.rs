//! Page view models.
//!
//! A renderer never touches a visual tree: it maps a [`NormalizedDocument`]
//! onto named sections, slots and cards. A section that is not present in
//! the [`PageView`] is hidden.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::model::{Location, NormalizedDocument, TemperatureUnit};

pub mod alerts;
pub mod humidity;
pub mod member;
pub mod temperature;
pub mod wind;

pub const MISSING: &str = "--";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Alerts,
    Temperature,
    Humidity,
    Wind,
    Member,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alerts => "alerts",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Wind => "wind",
            Self::Member => "member",
        }
    }
}

/// Page-specific rendering strategy plugged into the page controller.
pub trait PageRenderer {
    fn page(&self) -> Page;

    fn render(&self, doc: &NormalizedDocument) -> PageView;

    fn error_banner(&self, message: &str) -> String {
        format!("Error: {message}")
    }

    fn loading_label(&self) -> &'static str {
        "Loading..."
    }
}

pub fn renderer(page: Page) -> &'static dyn PageRenderer {
    match page {
        Page::Alerts => &alerts::AlertsPage,
        Page::Temperature => &temperature::TemperaturePage,
        Page::Humidity => &humidity::HumidityPage,
        Page::Wind => &wind::WindPage,
        Page::Member => &member::MemberPage,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub slots: Vec<Slot>,
}

impl Card {
    pub fn with_slot(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.slots.push(Slot {
            name,
            value: value.into(),
        });
        self
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        find_slot(&self.slots, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: &'static str,
    pub slots: Vec<Slot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
}

impl Section {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            slots: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn with_slot(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.slots.push(Slot {
            name,
            value: value.into(),
        });
        self
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        find_slot(&self.slots, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub sections: Vec<Section>,
}

impl PageView {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            sections: Vec::new(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn slot(&self, section: &str, name: &str) -> Option<&str> {
        self.section(section).and_then(|section| section.slot(name))
    }

    pub fn is_shown(&self, section: &str) -> bool {
        self.section(section).is_some()
    }
}

fn find_slot<'a>(slots: &'a [Slot], name: &str) -> Option<&'a str> {
    slots
        .iter()
        .find(|slot| slot.name == name)
        .map(|slot| slot.value.as_str())
}

pub fn location_label(location: &Location) -> String {
    match (&location.city, &location.region) {
        (Some(city), Some(region)) => format!("{city}, {region}"),
        _ => format!(
            "Lat: {:.4}, Lon: {:.4}",
            location.latitude, location.longitude
        ),
    }
}

/// `None` when the temperature is unknown; a record without a unit is
/// labelled in Fahrenheit.
pub fn temperature_text(value: Option<f64>, unit: Option<TemperatureUnit>) -> Option<String> {
    value.map(|value| {
        let unit = unit.unwrap_or(TemperatureUnit::Fahrenheit);
        format!("{value}°{}", unit.symbol())
    })
}

pub fn temperature_label(value: Option<f64>, unit: Option<TemperatureUnit>) -> String {
    temperature_text(value, unit).unwrap_or_else(|| MISSING.to_string())
}

pub fn humidity_text(value: Option<f64>) -> Option<String> {
    value.map(|value| format!("{value}%"))
}

pub fn humidity_label(value: Option<f64>) -> String {
    humidity_text(value).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Numeric portion of a free-text wind speed (`"8 mph"` -> `"8"`).
pub fn wind_speed_digits(raw: Option<&str>) -> String {
    raw.map(|raw| raw.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| !digits.is_empty())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn text_or(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

/// Hour of day in the timestamp's own offset, e.g. `"2 PM"`.
pub fn hour_label(time: Option<&DateTime<FixedOffset>>) -> String {
    time.map(|time| time.format("%-I %p").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn update_label(time: Option<&DateTime<FixedOffset>>) -> String {
    let stamp = time
        .map(|time| time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| MISSING.to_string());
    format!("Updated: {stamp}")
}
