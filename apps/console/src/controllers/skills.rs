use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::{InFlightGuard, Outcome};
use crate::api_client::{retrieve_skills, ApiTransport};
use crate::view::{Element, Notifier};

/// Fills the keywords input with trending skills for the entered profession.
pub struct KeywordsPrefill {
    trigger: Option<Element>,
    profession_input: Element,
    keywords_input: Element,
    api: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl KeywordsPrefill {
    /// `trigger` is the button that starts a lookup; it stays disabled while one runs.
    pub fn new(
        trigger: Option<Element>,
        profession_input: Element,
        keywords_input: Element,
        api: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            trigger,
            profession_input,
            keywords_input,
            api,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn prefill(&self) -> Outcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, self.trigger.as_ref()) else {
            return Outcome::Busy;
        };

        let profession = self.profession_input.value();
        match retrieve_skills(self.api.as_ref(), profession.trim()).await {
            Ok(keywords) => {
                info!(%profession, count = keywords.len(), "skills retrieved");
                self.keywords_input.set_value(&keywords.join(", "));
                Outcome::Rendered
            }
            Err(err) => {
                warn!(%profession, error = %err, "skills lookup failed");
                let message = err.user_message();
                self.notifier.alert(&message);
                Outcome::Failed(message)
            }
        }
    }
}
