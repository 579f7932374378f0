use crate::model::{CurrentConditions, Location, NormalizedDocument, WeatherPeriod};

use super::{
    Card, MISSING, NOT_AVAILABLE, Page, PageRenderer, PageView, Section, hour_label,
    location_label, temperature_label, temperature_text, text_or, update_label,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TemperaturePage;

impl PageRenderer for TemperaturePage {
    fn page(&self) -> Page {
        Page::Temperature
    }

    fn render(&self, doc: &NormalizedDocument) -> PageView {
        let mut view = PageView::new(Page::Temperature);

        if let Some(current) = &doc.current {
            view.sections.push(current_section(current, &doc.location));
        }
        if !doc.forecast.is_empty() {
            view.sections.push(
                Section::new("temp_forecast")
                    .with_cards(doc.forecast.iter().map(forecast_card).collect()),
            );
        }
        if !doc.hourly.is_empty() {
            view.sections.push(
                Section::new("hourly_temp")
                    .with_cards(doc.hourly.iter().map(hourly_card).collect()),
            );
        }

        view
    }
}

fn current_section(current: &CurrentConditions, location: &Location) -> Section {
    let period = &current.period;
    let feels_like = temperature_text(period.temperature, period.temperature_unit)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Section::new("current_temp")
        .with_slot(
            "temperature",
            temperature_label(period.temperature, period.temperature_unit),
        )
        .with_slot("location", location_label(location))
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
        .with_slot("update_time", update_label(period.start_time.as_ref()))
        .with_slot("feels_like", feels_like)
}

fn forecast_card(period: &WeatherPeriod) -> Card {
    let card = Card::default()
        .with_slot("name", text_or(period.name.as_deref(), MISSING))
        .with_slot(
            "temperature",
            temperature_label(period.temperature, period.temperature_unit),
        )
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING));

    match period.is_daytime {
        Some(true) => card.with_slot("time", "Day"),
        Some(false) => card.with_slot("time", "Night"),
        None => card,
    }
}

fn hourly_card(period: &WeatherPeriod) -> Card {
    Card::default()
        .with_slot("hour", hour_label(period.start_time.as_ref()))
        .with_slot(
            "temperature",
            temperature_label(period.temperature, period.temperature_unit),
        )
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
}
