use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weather_pages::{
    config::RuntimeConfig,
    controller::{DisplayState, PageController},
    demo::QuickLocation,
    error::{AppError, ErrorKind},
    model::UserAction,
    providers::{HttpWeatherSource, WeatherSource},
    render::{Page, PageView},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Weather pages rendered from the weather API or the demo set")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Active alerts (home page).
    Alerts(PageArgs),
    /// Current temperature, forecast and hourly strip.
    Temperature(PageArgs),
    /// Humidity, dewpoint and comfort bands.
    Humidity(PageArgs),
    /// Wind speed and compass direction.
    Wind(PageArgs),
    /// Compact member dashboard widget.
    Member(PageArgs),
}

#[derive(Debug, Clone, Args)]
struct PageArgs {
    /// Demo location; served from the built-in dataset when available.
    #[arg(long, value_enum)]
    quick: Option<QuickLocationArg>,
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    #[arg(long, value_enum)]
    output: Option<OutputModeArg>,
    #[arg(long)]
    json: bool,
}

const ENVELOPE_SCHEMA_VERSION: &str = "v1";
const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
const ERROR_CODE_USER_OUTPUT_MODE_CONFLICT: &str = "user.output_mode_conflict";
const ERROR_CODE_RUNTIME_PROVIDER_INIT: &str = "runtime.provider_init_failed";
const ERROR_CODE_RUNTIME_FETCH: &str = "runtime.fetch_failed";
const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum QuickLocationArg {
    Washington,
    NewYork,
    LosAngeles,
    Chicago,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputModeArg {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliOutputMode {
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl CliError {
    fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl From<QuickLocationArg> for QuickLocation {
    fn from(value: QuickLocationArg) -> Self {
        match value {
            QuickLocationArg::Washington => QuickLocation::Washington,
            QuickLocationArg::NewYork => QuickLocation::NewYork,
            QuickLocationArg::LosAngeles => QuickLocation::LosAngeles,
            QuickLocationArg::Chicago => QuickLocation::Chicago,
        }
    }
}

impl From<OutputModeArg> for CliOutputMode {
    fn from(value: OutputModeArg) -> Self {
        match value {
            OutputModeArg::Human => CliOutputMode::Human,
            OutputModeArg::Json => CliOutputMode::Json,
        }
    }
}

impl Commands {
    fn page(&self) -> Page {
        match self {
            Commands::Alerts(_) => Page::Alerts,
            Commands::Temperature(_) => Page::Temperature,
            Commands::Humidity(_) => Page::Humidity,
            Commands::Wind(_) => Page::Wind,
            Commands::Member(_) => Page::Member,
        }
    }

    fn args(&self) -> &PageArgs {
        match self {
            Commands::Alerts(args)
            | Commands::Temperature(args)
            | Commands::Humidity(args)
            | Commands::Wind(args)
            | Commands::Member(args) => args,
        }
    }
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match self.command.page() {
            Page::Alerts => "pages.alerts",
            Page::Temperature => "pages.temperature",
            Page::Humidity => "pages.humidity",
            Page::Wind => "pages.wind",
            Page::Member => "pages.member",
        }
    }

    fn output_mode_hint(&self) -> CliOutputMode {
        let args = self.command.args();
        if args.json {
            CliOutputMode::Json
        } else if let Some(explicit) = args.output {
            explicit.into()
        } else {
            CliOutputMode::Human
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let command = cli.command_name();
    let output_mode = cli.output_mode_hint();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            emit_error(command, output_mode, &error);
            std::process::exit(error.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(error) = result {
        eprintln!("failed to initialize logging: {error}");
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = RuntimeConfig::from_env();
    let source = HttpWeatherSource::new(&config)
        .map_err(|error| runtime_error(ERROR_CODE_RUNTIME_PROVIDER_INIT, error.to_string()))?;
    run_with(cli, &config, &source)
}

fn run_with<S>(cli: Cli, config: &RuntimeConfig, source: &S) -> Result<String, CliError>
where
    S: WeatherSource,
{
    let command = cli.command_name();
    let page = cli.command.page();
    let args = cli.command.args();

    let output_mode = resolve_output_mode(args.output, args.json, CliOutputMode::Human)?;
    let action = UserAction::new(args.quick.map(Into::into), args.lat, args.lon)
        .map_err(|error| map_app_error(error.into()))?;

    let mut controller = PageController::new(page, source, config.demo_enabled);
    controller.submit(action);
    let view = match controller.state() {
        DisplayState::Displayed(view) => view.clone(),
        DisplayState::Error(banner) => return Err(map_app_error(AppError::runtime(banner.clone()))),
        DisplayState::Idle | DisplayState::Loading => {
            return Err(runtime_error(
                ERROR_CODE_RUNTIME_FETCH,
                controller.loading_label(),
            ));
        }
    };
    let source_label = controller
        .last_source()
        .map(|source| source.as_str())
        .unwrap_or("network");

    match output_mode {
        CliOutputMode::Json => render_json_envelope(command, &view),
        CliOutputMode::Human => Ok(format_text_output(&view, source_label)),
    }
}

fn resolve_output_mode(
    output: Option<OutputModeArg>,
    json_flag: bool,
    default_mode: CliOutputMode,
) -> Result<CliOutputMode, CliError> {
    match (output.map(Into::into), json_flag) {
        (Some(mode), true) if mode != CliOutputMode::Json => Err(user_error(
            ERROR_CODE_USER_OUTPUT_MODE_CONFLICT,
            format!(
                "conflicting output flags: --json requires --output json (got {})",
                output_mode_label(mode)
            ),
        )),
        (Some(mode), _) => Ok(mode),
        (None, true) => Ok(CliOutputMode::Json),
        (None, false) => Ok(default_mode),
    }
}

fn render_json_envelope(command: &str, view: &PageView) -> Result<String, CliError> {
    let result = serde_json::to_value(view).map_err(|error| {
        runtime_error(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize output: {error}"),
        )
    })?;
    serde_json::to_string(&json!({
        "schema_version": ENVELOPE_SCHEMA_VERSION,
        "command": command,
        "ok": true,
        "result": result,
    }))
    .map_err(|error| {
        runtime_error(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize output envelope: {error}"),
        )
    })
}

fn emit_error(command: &str, output_mode: CliOutputMode, error: &CliError) {
    match output_mode {
        CliOutputMode::Json => {
            let payload = json!({
                "schema_version": ENVELOPE_SCHEMA_VERSION,
                "command": command,
                "ok": false,
                "error": {
                    "code": error.code,
                    "message": error.message,
                    "details": {
                        "kind": error.kind.as_str(),
                        "exit_code": error.exit_code(),
                    }
                }
            });
            let rendered = serde_json::to_string(&payload).unwrap_or_else(|serialize_error| {
                format!(
                    "{{\"schema_version\":\"{}\",\"command\":\"{}\",\"ok\":false,\"error\":{{\"code\":\"{}\",\"message\":\"{}\"}}}}",
                    ENVELOPE_SCHEMA_VERSION,
                    command,
                    ERROR_CODE_RUNTIME_SERIALIZE,
                    escape_json_string(&format!(
                        "failed to serialize error envelope: {serialize_error}"
                    )),
                )
            });
            println!("{rendered}");
        }
        CliOutputMode::Human => {
            eprintln!("error[{}]: {}", error.code, error.message);
        }
    }
}

fn user_error(code: &'static str, message: impl Into<String>) -> CliError {
    CliError::user(code, message)
}

fn runtime_error(code: &'static str, message: impl Into<String>) -> CliError {
    CliError::runtime(code, message)
}

fn map_app_error(error: AppError) -> CliError {
    match error.kind {
        ErrorKind::User => user_error(ERROR_CODE_USER_INVALID_INPUT, error.message),
        ErrorKind::Runtime => runtime_error(ERROR_CODE_RUNTIME_FETCH, error.message),
    }
}

fn output_mode_label(mode: CliOutputMode) -> &'static str {
    match mode {
        CliOutputMode::Human => "human",
        CliOutputMode::Json => "json",
    }
}

fn escape_json_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c < '\u{20}' => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

fn format_text_output(view: &PageView, source: &str) -> String {
    let mut lines = vec![format!("{} | source={source}", view.page.as_str())];

    for section in &view.sections {
        lines.push(format!("[{}]", section.id));
        for slot in &section.slots {
            lines.push(format!("  {}: {}", slot.name, slot.value));
        }
        for card in &section.cards {
            let fields = card
                .slots
                .iter()
                .map(|slot| format!("{}={}", slot.name, slot.value))
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(format!("  - {fields}"));
        }
    }

    lines.join("\n")
}
