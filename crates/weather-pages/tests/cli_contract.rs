use std::process::{Command, Output};

use serde_json::Value;
use weather_pages::render::{Page, renderer};
use weather_pages::{demo, normalize::normalize};

// Nothing listens on port 1, so network requests fail fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api";

fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_weather-pages"));
    cmd.args(args);
    cmd.env("WEATHER_API_BASE_URL", UNREACHABLE_API);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run weather-pages")
}

#[test]
fn cli_contract_page_view_serializes_sections_and_slots() {
    let quick = demo::QuickLocation::Washington.coordinates();
    let doc = demo::lookup(quick.lat, quick.lon).expect("demo record");
    let view = renderer(Page::Humidity).render(&normalize(&doc, quick));

    let value = serde_json::to_value(&view).expect("json");
    assert_eq!(value.get("page").and_then(Value::as_str), Some("humidity"));

    let first = value
        .get("sections")
        .and_then(Value::as_array)
        .and_then(|sections| sections.first())
        .expect("first section");
    assert_eq!(
        first.get("id").and_then(Value::as_str),
        Some("current_humidity")
    );
    assert!(first.get("slots").and_then(Value::as_array).is_some());
    assert!(first.get("cards").is_none());
}

#[test]
fn cli_contract_quick_location_is_served_from_demo_offline() {
    let output = run_cli(&["temperature", "--quick", "washington", "--json"], &[]);
    assert_eq!(output.status.code(), Some(0));

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(
        json.get("schema_version").and_then(Value::as_str),
        Some("v1")
    );
    assert_eq!(
        json.get("command").and_then(Value::as_str),
        Some("pages.temperature")
    );
    assert_eq!(json.get("ok").and_then(Value::as_bool), Some(true));
    assert!(String::from_utf8_lossy(&output.stdout).contains("42°F"));
}

#[test]
fn cli_contract_alerts_page_renders_no_active_alerts_for_demo() {
    let output = run_cli(&["alerts", "--quick", "chicago"], &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status: No Active Alerts"));
    assert!(stdout.contains("There are currently no weather alerts for Chicago, IL"));
}

#[test]
fn cli_contract_json_error_envelope_has_required_keys() {
    let output = run_cli(&["wind", "--lat", "41.0", "--json"], &[]);
    assert_eq!(output.status.code(), Some(2));

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(
        json.get("command").and_then(Value::as_str),
        Some("pages.wind")
    );
    assert_eq!(json.get("ok").and_then(Value::as_bool), Some(false));
    assert_eq!(
        json.get("error")
            .and_then(|error| error.get("code"))
            .and_then(Value::as_str),
        Some("user.invalid_input")
    );
    assert_eq!(
        json.get("error")
            .and_then(|error| error.get("details"))
            .and_then(|details| details.get("exit_code"))
            .and_then(Value::as_i64),
        Some(2)
    );
}

#[test]
fn cli_contract_output_conflict_returns_machine_readable_code() {
    let output = run_cli(
        &["member", "--quick", "new-york", "--json", "--output", "human"],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(
        json.get("error")
            .and_then(|error| error.get("code"))
            .and_then(Value::as_str),
        Some("user.output_mode_conflict")
    );
}

#[test]
fn cli_contract_unreachable_api_is_a_runtime_error() {
    let output = run_cli(
        &["humidity", "--lat", "25.03", "--lon", "121.56", "--json"],
        &[("WEATHER_API_TIMEOUT_SECS", "5")],
    );
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(json.get("ok").and_then(Value::as_bool), Some(false));
    assert_eq!(
        json.get("error")
            .and_then(|error| error.get("code"))
            .and_then(Value::as_str),
        Some("runtime.fetch_failed")
    );
    assert!(
        json.get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .is_some_and(|message| message.starts_with("Error: "))
    );
}

#[test]
fn cli_contract_demo_can_be_disabled() {
    let output = run_cli(
        &["temperature", "--quick", "washington", "--json"],
        &[("WEATHER_DEMO_DATA", "off"), ("WEATHER_API_TIMEOUT_SECS", "5")],
    );
    assert_eq!(output.status.code(), Some(1));
}
