use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::model::WeatherDocument;

use super::{FetchError, GENERIC_FETCH_ERROR};

const WEATHER_PATH: &str = "/weather";

#[derive(Debug, Serialize)]
struct WeatherQuery {
    lat: f64,
    lon: f64,
}

pub fn fetch_weather(
    client: &Client,
    base_url: &str,
    lat: f64,
    lon: f64,
) -> Result<WeatherDocument, FetchError> {
    let url = weather_endpoint(base_url);
    tracing::debug!(%url, lat, lon, "requesting weather document");

    let (status, body) = execute_request(client.get(&url).query(&WeatherQuery { lat, lon }))?;
    let result = classify_response(status, &body);

    match &result {
        Ok(_) => tracing::debug!(status = status.as_u16(), "weather document received"),
        Err(error) => tracing::warn!(status = status.as_u16(), %error, "weather request failed"),
    }
    result
}

pub fn weather_endpoint(base_url: &str) -> String {
    format!("{}{WEATHER_PATH}", base_url.trim_end_matches('/'))
}

fn execute_request(request: RequestBuilder) -> Result<(StatusCode, String), FetchError> {
    let response = request.send().map_err(|error| {
        tracing::warn!(%error, "weather request could not be sent");
        FetchError::Network(error.to_string())
    })?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|error| FetchError::Network(error.to_string()))?;

    Ok((status, body))
}

/// A response is either fully accepted, however sparse, or fully rejected.
pub fn classify_response(status: StatusCode, body: &str) -> Result<WeatherDocument, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            detail: extract_error_detail(body).unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string()),
        });
    }

    serde_json::from_str::<WeatherDocument>(body).map_err(|error| {
        FetchError::MalformedResponse(format!("{GENERIC_FETCH_ERROR}: {error}"))
    })
}

fn extract_error_detail(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body.trim()).ok()?;
    json.get("detail")
        .and_then(Value::as_str)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
