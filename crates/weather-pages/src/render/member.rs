use crate::model::{NormalizedDocument, TemperatureUnit, WeatherPeriod};

use super::alerts::DEFAULT_EVENT;
use super::{
    Card, MISSING, NOT_AVAILABLE, Page, PageRenderer, PageView, Section, humidity_text,
    location_label, temperature_label, text_or,
};

pub const MEMBER_FORECAST_LIMIT: usize = 3;

/// Compact widget for the member dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberPage;

impl PageRenderer for MemberPage {
    fn page(&self) -> Page {
        Page::Member
    }

    fn render(&self, doc: &NormalizedDocument) -> PageView {
        let mut view = PageView::new(Page::Member);

        let Some(current) = &doc.current else {
            view.sections.push(
                Section::new("member_weather").with_slot("message", "No weather data available."),
            );
            return view;
        };

        let period = &current.period;
        let unit = period
            .temperature_unit
            .unwrap_or(TemperatureUnit::Fahrenheit);
        let temperature = period
            .temperature
            .map(|value| value.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let wind = format!(
            "{} {}",
            period.wind_speed.as_deref().unwrap_or(NOT_AVAILABLE),
            period.wind_direction.as_deref().unwrap_or_default()
        );

        let mut section = Section::new("member_weather")
            .with_slot("temperature", temperature)
            .with_slot("temperature_unit", format!("°{}", unit.symbol()))
            .with_slot("location", location_label(&doc.location))
            .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
            .with_slot("wind", wind.trim_end());

        if let Some(humidity) = humidity_text(period.humidity) {
            section = section.with_slot("humidity", humidity);
        }

        if let Some(first) = doc.alerts.first() {
            section = section
                .with_slot(
                    "alert_summary",
                    format!("{} Active Alert(s)", doc.alerts.len()),
                )
                .with_slot(
                    "alert_event",
                    first.event.as_deref().unwrap_or(DEFAULT_EVENT),
                );
        }

        let cards = doc
            .forecast
            .iter()
            .take(MEMBER_FORECAST_LIMIT)
            .map(forecast_card)
            .collect();
        view.sections.push(section.with_cards(cards));
        view
    }

    fn error_banner(&self, message: &str) -> String {
        format!("Failed to load weather: {message}")
    }

    fn loading_label(&self) -> &'static str {
        "Loading weather..."
    }
}

fn forecast_card(period: &WeatherPeriod) -> Card {
    Card::default()
        .with_slot("name", text_or(period.name.as_deref(), MISSING))
        .with_slot(
            "temperature",
            temperature_label(period.temperature, period.temperature_unit),
        )
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
}
