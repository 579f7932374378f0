use crate::model::{CurrentConditions, Location, NormalizedDocument, WeatherPeriod};
use crate::units::compass_direction_to_degrees;

use super::{
    Card, MISSING, NOT_AVAILABLE, Page, PageRenderer, PageView, Section, hour_label,
    location_label, text_or, update_label, wind_speed_digits,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct WindPage;

impl PageRenderer for WindPage {
    fn page(&self) -> Page {
        Page::Wind
    }

    fn render(&self, doc: &NormalizedDocument) -> PageView {
        let mut view = PageView::new(Page::Wind);

        if let Some(current) = &doc.current {
            view.sections.push(current_section(current, &doc.location));
        }
        if !doc.forecast.is_empty() {
            view.sections.push(
                Section::new("wind_forecast")
                    .with_cards(doc.forecast.iter().map(forecast_card).collect()),
            );
        }
        if !doc.hourly.is_empty() {
            view.sections.push(
                Section::new("hourly_wind")
                    .with_cards(doc.hourly.iter().map(hourly_card).collect()),
            );
        }

        view
    }
}

fn current_section(current: &CurrentConditions, location: &Location) -> Section {
    let period = &current.period;
    let direction = period.wind_direction.as_deref();

    Section::new("current_wind")
        .with_slot("wind_speed", wind_speed_digits(period.wind_speed.as_deref()))
        .with_slot("wind_direction", text_or(direction, MISSING))
        .with_slot(
            "arrow_degrees",
            compass_direction_to_degrees(direction).to_string(),
        )
        .with_slot("location", location_label(location))
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
        .with_slot("update_time", update_label(period.start_time.as_ref()))
        .with_slot("wind_gust", NOT_AVAILABLE)
}

fn forecast_card(period: &WeatherPeriod) -> Card {
    let direction = text_or(period.wind_direction.as_deref(), MISSING);

    Card::default()
        .with_slot("name", text_or(period.name.as_deref(), MISSING))
        .with_slot("wind_speed", text_or(period.wind_speed.as_deref(), MISSING))
        .with_slot("heading", format!("From {direction}"))
        .with_slot("direction", direction)
        .with_slot("condition", text_or(period.condition.as_deref(), MISSING))
}

fn hourly_card(period: &WeatherPeriod) -> Card {
    Card::default()
        .with_slot("hour", hour_label(period.start_time.as_ref()))
        .with_slot("wind_speed", text_or(period.wind_speed.as_deref(), MISSING))
        .with_slot(
            "direction",
            text_or(period.wind_direction.as_deref(), MISSING),
        )
}
