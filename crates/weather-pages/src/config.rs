use std::collections::HashMap;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

pub const WEATHER_API_BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";
pub const WEATHER_API_TIMEOUT_SECS_ENV: &str = "WEATHER_API_TIMEOUT_SECS";
pub const WEATHER_DEMO_DATA_ENV: &str = "WEATHER_DEMO_DATA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub base_url: String,
    /// `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub demo_enabled: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
            demo_enabled: true,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub(crate) fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            base_url: resolve_base_url(&map),
            timeout_secs: resolve_timeout_secs(&map),
            demo_enabled: resolve_demo_enabled(&map),
        }
    }
}

fn env_value<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn resolve_base_url(env_map: &HashMap<String, String>) -> String {
    env_value(env_map, WEATHER_API_BASE_URL_ENV)
        .map(|value| value.trim_end_matches('/'))
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

fn resolve_timeout_secs(env_map: &HashMap<String, String>) -> Option<u64> {
    env_value(env_map, WEATHER_API_TIMEOUT_SECS_ENV)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
}

fn resolve_demo_enabled(env_map: &HashMap<String, String>) -> bool {
    match env_value(env_map, WEATHER_DEMO_DATA_ENV) {
        Some(value) => !matches!(
            value.to_ascii_lowercase().as_str(),
            "0" | "false" | "off" | "no"
        ),
        None => true,
    }
}
