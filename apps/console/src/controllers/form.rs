//! Generic form controller: one submit handler parameterized by a `FormBinding`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{InFlightGuard, Outcome};
use crate::api_client::{decode, ApiTransport, Reply};
use crate::errors::ConsoleError;
use crate::view::{Element, Notifier};

/// The per-form part of a form controller: which endpoint it posts to,
/// how the request is read off the form, and how a 2xx reply is shown.
pub trait FormBinding: Send + Sync {
    type Request: Serialize + Send;
    type Reply: DeserializeOwned + Send;

    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> &'static str;

    fn collect(&self, form: &Element) -> Self::Request;

    /// Renders a successful reply. Returns `MissingPayload` when the reply
    /// lacks what this form needs, leaving the view untouched.
    fn render(
        &self,
        reply: Reply<Self::Reply>,
        form: &Element,
        notifier: &dyn Notifier,
    ) -> Result<(), ConsoleError>;
}

pub struct FormController<B: FormBinding> {
    form: Element,
    submit_control: Option<Element>,
    binding: B,
    api: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl<B: FormBinding> FormController<B> {
    pub fn new(
        form: Element,
        binding: B,
        api: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let submit_control = find_submit_control(&form);
        Self {
            form,
            submit_control,
            binding,
            api,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn form(&self) -> &Element {
        &self.form
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handles one submit event. Never fails: every error is shown through
    /// the notifier and reported back as `Outcome::Failed`.
    pub async fn submit(&self) -> Outcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, self.submit_control.as_ref())
        else {
            debug!(form = self.binding.name(), "submit ignored, request in flight");
            return Outcome::Busy;
        };

        let submission = Uuid::new_v4();
        info!(
            %submission,
            form = self.binding.name(),
            endpoint = self.binding.endpoint(),
            "submitting form"
        );

        match self.round_trip().await {
            Ok(()) => {
                info!(%submission, form = self.binding.name(), "reply rendered");
                Outcome::Rendered
            }
            Err(err) => {
                warn!(%submission, form = self.binding.name(), error = %err, "submission failed");
                let message = err.user_message();
                self.notifier.alert(&message);
                Outcome::Failed(message)
            }
        }
    }

    async fn round_trip(&self) -> Result<(), ConsoleError> {
        let body = serde_json::to_value(self.binding.collect(&self.form))?;
        debug!(form = self.binding.name(), %body, "request body");

        let response = self.api.post_json(self.binding.endpoint(), &body).await?;
        let reply = decode::<B::Reply>(response)?;
        self.binding
            .render(reply, &self.form, self.notifier.as_ref())
    }
}

fn find_submit_control(form: &Element) -> Option<Element> {
    form.descendants()
        .into_iter()
        .find(|node| node.attr("type").as_deref() == Some("submit"))
}
