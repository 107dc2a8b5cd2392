use std::sync::Arc;

use tracing::{info, warn};

use super::Outcome;
use crate::api_client::{fetch_health, ApiTransport};
use crate::models::HealthReport;
use crate::view::{Color, Element, ListItem};

pub const CHECKING_PLACEHOLDER: &str = "Checking system health...";

/// Fills a status list from `GET /api/health-check` on demand.
///
/// Every call replaces the whole list, so repeated or overlapping checks
/// leave the list showing whichever reply was rendered last.
pub struct HealthController {
    list: Element,
    api: Arc<dyn ApiTransport>,
}

impl HealthController {
    pub fn new(list: Element, api: Arc<dyn ApiTransport>) -> Self {
        Self { list, api }
    }

    pub fn list(&self) -> &Element {
        &self.list
    }

    pub async fn check(&self) -> Outcome {
        self.list
            .replace_items(vec![ListItem::plain(CHECKING_PLACEHOLDER)]);

        match fetch_health(self.api.as_ref()).await {
            Ok(report) => {
                info!(subsystems = report.len(), "health report received");
                self.list.replace_items(render_report(&report));
                Outcome::Rendered
            }
            Err(err) => {
                warn!(error = %err, "health check failed");
                let message = err.user_message();
                self.list
                    .replace_items(vec![ListItem::colored(message.clone(), Color::Red)]);
                Outcome::Failed(message)
            }
        }
    }
}

/// One entry per subsystem: `NAME:` label, verbatim message, green only when healthy.
pub fn render_report(report: &HealthReport) -> Vec<ListItem> {
    report
        .iter()
        .map(|(name, health)| {
            let color = if health.status.is_healthy() {
                Color::Green
            } else {
                Color::Red
            };
            ListItem::labeled(
                format!("{}:", name.to_uppercase()),
                health.message.clone(),
                color,
            )
        })
        .collect()
}
