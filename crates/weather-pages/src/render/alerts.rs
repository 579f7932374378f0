use crate::model::{Alert, NormalizedDocument, Severity};

use super::{Card, Page, PageRenderer, PageView, Section, location_label};

pub const DEFAULT_EVENT: &str = "Weather Alert";
pub const DEFAULT_URGENCY: &str = "Unknown";
pub const NO_DETAILS: &str = "No details available";

/// Home page: active alerts for the selected location.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertsPage;

impl PageRenderer for AlertsPage {
    fn page(&self) -> Page {
        Page::Alerts
    }

    fn render(&self, doc: &NormalizedDocument) -> PageView {
        let location = location_label(&doc.location);
        let section = if doc.alerts.is_empty() {
            Section::new("alerts")
                .with_slot("status", "No Active Alerts")
                .with_slot(
                    "message",
                    format!("There are currently no weather alerts for {location}"),
                )
        } else {
            Section::new("alerts")
                .with_slot(
                    "heading",
                    format!("{} Active Alert(s) for {location}", doc.alerts.len()),
                )
                .with_cards(doc.alerts.iter().map(alert_card).collect())
        };

        let mut view = PageView::new(Page::Alerts);
        view.sections.push(section);
        view
    }
}

pub fn alert_card(alert: &Alert) -> Card {
    // Alerts without a severity are styled as moderate.
    let severity = alert.severity.unwrap_or(Severity::Moderate);
    let headline = alert
        .headline
        .as_deref()
        .or(alert.description.as_deref())
        .unwrap_or(NO_DETAILS);

    let card = Card::default()
        .with_slot("event", alert.event.as_deref().unwrap_or(DEFAULT_EVENT))
        .with_slot("severity", severity.as_str().to_ascii_uppercase())
        .with_slot("severity_class", severity.as_str())
        .with_slot(
            "urgency",
            alert.urgency.as_deref().unwrap_or(DEFAULT_URGENCY),
        )
        .with_slot("headline", headline);

    match alert.instruction.as_deref() {
        Some(instruction) => card.with_slot("instruction", instruction),
        None => card,
    }
}
