//! Per-page display state machine.
//!
//! `Idle -> Loading -> Displayed | Error`, re-entered on every user action.
//! Overlapping requests are not cancelled: whichever completion is applied
//! last replaces the view.

use serde::Serialize;

use crate::demo;
use crate::model::{Coordinates, UserAction, WeatherDocument};
use crate::normalize::normalize;
use crate::providers::{FetchError, WeatherSource};
use crate::render::{Page, PageRenderer, PageView, renderer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Displayed(PageView),
    /// Banner text, already formatted for the page.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Demo,
    Network,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Demo => "demo",
            DataSource::Network => "network",
        }
    }
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestTicket {
    id: u64,
    requested: Coordinates,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn requested(&self) -> Coordinates {
        self.requested
    }
}

pub struct PageController<'a, S> {
    renderer: &'static dyn PageRenderer,
    source: &'a S,
    demo_enabled: bool,
    state: DisplayState,
    issued: u64,
    last_source: Option<DataSource>,
}

impl<'a, S> PageController<'a, S>
where
    S: WeatherSource,
{
    pub fn new(page: Page, source: &'a S, demo_enabled: bool) -> Self {
        Self::with_renderer(renderer(page), source, demo_enabled)
    }

    pub fn with_renderer(
        renderer: &'static dyn PageRenderer,
        source: &'a S,
        demo_enabled: bool,
    ) -> Self {
        Self {
            renderer,
            source,
            demo_enabled,
            state: DisplayState::Idle,
            issued: 0,
            last_source: None,
        }
    }

    pub fn page(&self) -> Page {
        self.renderer.page()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn last_source(&self) -> Option<DataSource> {
        self.last_source
    }

    pub fn loading_label(&self) -> &'static str {
        self.renderer.loading_label()
    }

    /// Enters Loading, dropping any previous view or banner.
    pub fn begin(&mut self, requested: Coordinates) -> RequestTicket {
        self.issued += 1;
        self.state = DisplayState::Loading;
        tracing::debug!(
            page = self.page().as_str(),
            ticket = self.issued,
            lat = requested.lat,
            lon = requested.lon,
            "request started"
        );
        RequestTicket {
            id: self.issued,
            requested,
        }
    }

    /// Applies a finished request. Stale tickets are applied too.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<WeatherDocument, FetchError>,
    ) -> &DisplayState {
        if ticket.id != self.issued {
            tracing::debug!(
                ticket = ticket.id,
                latest = self.issued,
                "applying completion of an earlier request"
            );
        }

        self.state = match outcome {
            Ok(doc) => {
                let normalized = normalize(&doc, ticket.requested);
                DisplayState::Displayed(self.renderer.render(&normalized))
            }
            Err(error) => {
                tracing::warn!(page = self.page().as_str(), %error, "weather fetch failed");
                DisplayState::Error(self.renderer.error_banner(&error.to_string()))
            }
        };
        &self.state
    }

    /// Runs one user action end to end.
    pub fn submit(&mut self, action: UserAction) -> &DisplayState {
        let ticket = self.begin(action.coordinates());
        let (source, outcome) = self.resolve(action);
        self.last_source = Some(source);
        self.complete(ticket, outcome)
    }

    fn resolve(&self, action: UserAction) -> (DataSource, Result<WeatherDocument, FetchError>) {
        let coordinates = action.coordinates();

        match action {
            UserAction::QuickLocation(location) if self.demo_enabled => {
                if let Some(doc) = demo::lookup(coordinates.lat, coordinates.lon) {
                    tracing::info!(location = location.slug(), "served from demo dataset");
                    return (DataSource::Demo, Ok(doc));
                }
                tracing::debug!(location = location.slug(), "demo dataset miss");
            }
            UserAction::QuickLocation(_) | UserAction::SubmitCoordinates(_) => {}
        }

        (
            DataSource::Network,
            self.source.fetch_weather(coordinates.lat, coordinates.lon),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::demo::QuickLocation;
    use crate::model::{AlertRecord, LocationRecord, PeriodRecord};

    struct FakeSource {
        result: Result<WeatherDocument, FetchError>,
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn ok(doc: WeatherDocument) -> Self {
            Self {
                result: Ok(doc),
                calls: Cell::new(0),
            }
        }

        fn failing(error: FetchError) -> Self {
            Self {
                result: Err(error),
                calls: Cell::new(0),
            }
        }
    }

    impl WeatherSource for FakeSource {
        fn fetch_weather(&self, _lat: f64, _lon: f64) -> Result<WeatherDocument, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn network_doc(city: &str, state: &str, temperature: f64) -> WeatherDocument {
        WeatherDocument {
            location: Some(LocationRecord {
                lat: Some(47.6062),
                lon: Some(-122.3321),
                city: Some(city.to_string()),
                state: Some(state.to_string()),
                grid_id: None,
            }),
            current: Some(PeriodRecord {
                temperature: Some(temperature),
                temperature_unit: Some("F".to_string()),
                ..PeriodRecord::default()
            }),
            alerts: Some(Vec::new()),
            ..WeatherDocument::default()
        }
    }

    fn displayed(state: &DisplayState) -> &PageView {
        match state {
            DisplayState::Displayed(view) => view,
            other => panic!("expected displayed view, got {other:?}"),
        }
    }

    fn seattle() -> Coordinates {
        Coordinates {
            lat: 47.6062,
            lon: -122.3321,
        }
    }

    #[test]
    fn controller_quick_location_uses_demo_without_network_call() {
        let source = FakeSource::failing(FetchError::Network("offline".to_string()));
        let mut controller = PageController::new(Page::Temperature, &source, true);

        let state = controller.submit(UserAction::QuickLocation(QuickLocation::Washington));

        assert_eq!(
            displayed(state).slot("current_temp", "temperature"),
            Some("42°F")
        );
        assert_eq!(source.calls.get(), 0);
        assert_eq!(controller.last_source(), Some(DataSource::Demo));
    }

    #[test]
    fn controller_quick_location_goes_to_network_when_demo_disabled() {
        let source = FakeSource::ok(network_doc("Washington", "DC", 50.0));
        let mut controller = PageController::new(Page::Temperature, &source, false);

        let state = controller.submit(UserAction::QuickLocation(QuickLocation::Washington));

        assert_eq!(
            displayed(state).slot("current_temp", "temperature"),
            Some("50°F")
        );
        assert_eq!(source.calls.get(), 1);
        assert_eq!(controller.last_source(), Some(DataSource::Network));
    }

    #[test]
    fn controller_coordinate_submit_always_uses_network() {
        let source = FakeSource::ok(network_doc("Washington", "DC", 51.0));
        let mut controller = PageController::new(Page::Temperature, &source, true);

        // Exact demo coordinates, but typed into the form.
        let state = controller.submit(UserAction::SubmitCoordinates(Coordinates {
            lat: 38.8894,
            lon: -77.0352,
        }));

        assert_eq!(
            displayed(state).slot("current_temp", "temperature"),
            Some("51°F")
        );
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn controller_shows_verbatim_detail_for_http_failure() {
        let source = FakeSource::failing(FetchError::Http {
            status: 500,
            detail: "upstream timeout".to_string(),
        });
        let mut controller = PageController::new(Page::Temperature, &source, true);

        let state = controller.submit(UserAction::SubmitCoordinates(seattle()));

        assert_eq!(
            state,
            &DisplayState::Error("Error: upstream timeout".to_string())
        );
    }

    #[test]
    fn controller_member_page_uses_its_own_banner() {
        let source = FakeSource::failing(FetchError::Http {
            status: 502,
            detail: "Failed to fetch weather data".to_string(),
        });
        let mut controller = PageController::new(Page::Member, &source, true);

        let state = controller.submit(UserAction::SubmitCoordinates(seattle()));

        assert_eq!(
            state,
            &DisplayState::Error("Failed to load weather: Failed to fetch weather data".to_string())
        );
        assert_eq!(controller.loading_label(), "Loading weather...");
    }

    #[test]
    fn controller_renders_no_active_alerts_from_network() {
        let source = FakeSource::ok(network_doc("Seattle", "WA", 48.0));
        let mut controller = PageController::new(Page::Alerts, &source, true);

        let view = displayed(controller.submit(UserAction::SubmitCoordinates(seattle()))).clone();

        assert_eq!(view.slot("alerts", "status"), Some("No Active Alerts"));
        assert_eq!(
            view.slot("alerts", "message"),
            Some("There are currently no weather alerts for Seattle, WA")
        );
    }

    #[test]
    fn controller_renders_alert_cards_from_network() {
        let mut doc = network_doc("Seattle", "WA", 48.0);
        doc.alerts = Some(vec![AlertRecord {
            event: Some("Wind Advisory".to_string()),
            severity: Some("Minor".to_string()),
            ..AlertRecord::default()
        }]);
        let source = FakeSource::ok(doc);
        let mut controller = PageController::new(Page::Alerts, &source, true);

        let view = displayed(controller.submit(UserAction::SubmitCoordinates(seattle()))).clone();
        let section = view.section("alerts").expect("alerts");

        assert_eq!(
            section.slot("heading"),
            Some("1 Active Alert(s) for Seattle, WA")
        );
        assert_eq!(section.cards[0].slot("severity"), Some("MINOR"));
    }

    #[test]
    fn controller_last_applied_completion_wins() {
        let source = FakeSource::ok(WeatherDocument::default());
        let mut controller = PageController::new(Page::Temperature, &source, true);

        let first = controller.begin(seattle());
        let second = controller.begin(seattle());
        assert_eq!(controller.state(), &DisplayState::Loading);
        assert!(second.id() > first.id());

        controller.complete(second, Ok(network_doc("Seattle", "WA", 60.0)));
        let state = controller.complete(first, Ok(network_doc("Seattle", "WA", 40.0)));

        assert_eq!(
            displayed(state).slot("current_temp", "temperature"),
            Some("40°F")
        );
    }

    #[test]
    fn controller_begin_clears_previous_error() {
        let source = FakeSource::failing(FetchError::Network("offline".to_string()));
        let mut controller = PageController::new(Page::Wind, &source, true);

        controller.submit(UserAction::SubmitCoordinates(seattle()));
        assert!(matches!(controller.state(), DisplayState::Error(_)));

        let ticket = controller.begin(seattle());
        assert_eq!(controller.state(), &DisplayState::Loading);
        assert_eq!(ticket.requested(), seattle());
    }

    #[test]
    fn controller_normalizes_against_requested_coordinates() {
        let source = FakeSource::ok(WeatherDocument {
            current: Some(PeriodRecord::default()),
            ..WeatherDocument::default()
        });
        let mut controller = PageController::new(Page::Wind, &source, true);

        let state = controller.submit(UserAction::SubmitCoordinates(Coordinates {
            lat: 12.5,
            lon: -3.25,
        }));

        assert_eq!(
            displayed(state).slot("current_wind", "location"),
            Some("Lat: 12.5000, Lon: -3.2500")
        );
    }
}
