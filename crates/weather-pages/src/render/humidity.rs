use crate::model::{CurrentConditions, Location, NormalizedDocument, WeatherPeriod};
use crate::units::{fahrenheit_label, humidity_comfort_band};

use super::{
    Card, MISSING, NOT_AVAILABLE, Page, PageRenderer, PageView, Section, hour_label,
    humidity_label, humidity_text, location_label, temperature_label, temperature_text, text_or,
    update_label,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct HumidityPage;

impl PageRenderer for HumidityPage {
    fn page(&self) -> Page {
        Page::Humidity
    }

    fn render(&self, doc: &NormalizedDocument) -> PageView {
        let mut view = PageView::new(Page::Humidity);

        if let Some(current) = &doc.current {
            view.sections.push(current_section(current, &doc.location));
        }
        if !doc.forecast.is_empty() {
            view.sections.push(
                Section::new("humidity_forecast")
                    .with_cards(doc.forecast.iter().map(forecast_card).collect()),
            );
        }
        if !doc.hourly.is_empty() {
            view.sections.push(
                Section::new("hourly_humidity")
                    .with_cards(doc.hourly.iter().map(hourly_card).collect()),
            );
        }

        view
    }
}

fn current_section(current: &CurrentConditions, location: &Location) -> Section {
    let period = &current.period;
    // The headline value uses "--" while cards use "N/A".
    let humidity = humidity_text(period.humidity).unwrap_or_else(|| MISSING.to_string());
    let dewpoint = current
        .dewpoint_c
        .map(fahrenheit_label)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let temperature = temperature_text(period.temperature, period.temperature_unit)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Section::new("current_humidity")
        .with_slot("humidity", humidity)
        .with_slot(
            "humidity_level",
            humidity_comfort_band(period.humidity).label(),
        )
        .with_slot("dewpoint", dewpoint)
        .with_slot("temperature", temperature)
        .with_slot("location", location_label(location))
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
        .with_slot("update_time", update_label(period.start_time.as_ref()))
}

fn forecast_card(period: &WeatherPeriod) -> Card {
    Card::default()
        .with_slot("name", text_or(period.name.as_deref(), MISSING))
        .with_slot("humidity", humidity_label(period.humidity))
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
        .with_slot(
            "temperature",
            temperature_label(period.temperature, period.temperature_unit),
        )
        .with_slot("comfort", humidity_comfort_band(period.humidity).label())
}

fn hourly_card(period: &WeatherPeriod) -> Card {
    Card::default()
        .with_slot("hour", hour_label(period.start_time.as_ref()))
        .with_slot("humidity", humidity_label(period.humidity))
        .with_slot("comfort", humidity_comfort_band(period.humidity).label())
}
