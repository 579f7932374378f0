use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::model::WeatherDocument;

pub mod weather_api;

/// Message shown when a failed response carries no usable detail.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch weather data";

/// Network weather source, `GET {base}/weather?lat=..&lon=..`.
pub trait WeatherSource {
    fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherDocument, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    client: Client,
    base_url: String,
}

impl HttpWeatherSource {
    pub fn new(config: &RuntimeConfig) -> Result<Self, FetchError> {
        // The blocking client defaults to 30s; an unset timeout means none.
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|error| FetchError::Network(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl WeatherSource for HttpWeatherSource {
    fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherDocument, FetchError> {
        weather_api::fetch_weather(&self.client, &self.base_url, lat, lon)
    }
}

/// Display is the user-facing detail, without any prefix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),
    #[error("{detail}")]
    Http { status: u16, detail: String },
    #[error("{0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Network(_) | FetchError::MalformedResponse(_) => None,
        }
    }
}
