use chrono::DateTime;

use crate::model::{
    Alert, AlertRecord, Coordinates, CurrentConditions, Location, NormalizedDocument,
    PeriodRecord, Severity, TemperatureUnit, WeatherDocument, WeatherPeriod,
};

pub const FORECAST_LIMIT: usize = 7;

pub fn normalize(doc: &WeatherDocument, requested: Coordinates) -> NormalizedDocument {
    NormalizedDocument {
        location: normalize_location(doc, requested),
        current: normalize_current(doc),
        forecast: normalize_forecast(doc),
        hourly: normalize_hourly(doc),
        alerts: normalize_alerts(doc),
    }
}

/// Coordinates come from the document when present, otherwise from the request.
pub fn normalize_location(doc: &WeatherDocument, requested: Coordinates) -> Location {
    let record = doc.location.as_ref();
    Location {
        latitude: record
            .and_then(|location| location.lat)
            .unwrap_or(requested.lat),
        longitude: record
            .and_then(|location| location.lon)
            .unwrap_or(requested.lon),
        city: record.and_then(|location| non_empty(location.city.as_deref())),
        region: record.and_then(|location| non_empty(location.state.as_deref())),
    }
}

pub fn normalize_current(doc: &WeatherDocument) -> Option<CurrentConditions> {
    doc.current.as_ref().map(|record| CurrentConditions {
        period: normalize_period(record),
        dewpoint_c: record
            .dewpoint
            .as_ref()
            .and_then(|measurement| measurement.value),
    })
}

pub fn normalize_forecast(doc: &WeatherDocument) -> Vec<WeatherPeriod> {
    doc.forecast
        .iter()
        .flatten()
        .take(FORECAST_LIMIT)
        .map(normalize_period)
        .collect()
}

pub fn normalize_hourly(doc: &WeatherDocument) -> Vec<WeatherPeriod> {
    doc.hourly.iter().flatten().map(normalize_period).collect()
}

/// Missing and empty alert lists both normalize to an empty list.
pub fn normalize_alerts(doc: &WeatherDocument) -> Vec<Alert> {
    doc.alerts.iter().flatten().map(normalize_alert).collect()
}

fn normalize_period(record: &PeriodRecord) -> WeatherPeriod {
    WeatherPeriod {
        name: record.name.clone(),
        start_time: record
            .start_time
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok()),
        temperature: record.temperature.filter(|value| value.is_finite()),
        temperature_unit: record
            .temperature_unit
            .as_deref()
            .and_then(TemperatureUnit::from_symbol),
        condition: non_empty(record.short_forecast.as_deref()),
        wind_speed: non_empty(record.wind_speed.as_deref()),
        wind_direction: non_empty(record.wind_direction.as_deref()),
        humidity: record
            .relative_humidity
            .as_ref()
            .and_then(|measurement| measurement.value),
        is_daytime: record.is_daytime,
    }
}

fn normalize_alert(record: &AlertRecord) -> Alert {
    Alert {
        severity: non_empty(record.severity.as_deref()).map(|raw| Severity::parse(&raw)),
        urgency: non_empty(record.urgency.as_deref()),
        event: non_empty(record.event.as_deref()),
        headline: non_empty(record.headline.as_deref()),
        description: non_empty(record.description.as_deref()),
        instruction: non_empty(record.instruction.as_deref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
