use super::form::FormBinding;
use crate::api_client::{feedback_from_reply, Reply, SUBMIT_FEEDBACK_PATH};
use crate::errors::ConsoleError;
use crate::models::{FeedbackReply, FeedbackRequest};
use crate::view::{Element, Notifier};

/// Binding for the star-rating feedback form. On success the server's
/// message is alerted and the form is cleared.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedbackBinding;

impl FormBinding for FeedbackBinding {
    type Request = FeedbackRequest;
    type Reply = FeedbackReply;

    fn name(&self) -> &'static str {
        "feedback"
    }

    fn endpoint(&self) -> &'static str {
        SUBMIT_FEEDBACK_PATH
    }

    fn collect(&self, form: &Element) -> FeedbackRequest {
        FeedbackRequest {
            stars: form.field_value("stars"),
            comments: form.field_value("comments"),
        }
    }

    fn render(
        &self,
        reply: Reply<FeedbackReply>,
        form: &Element,
        notifier: &dyn Notifier,
    ) -> Result<(), ConsoleError> {
        let message = feedback_from_reply(reply)?;
        notifier.alert(&message);
        form.reset_fields();
        Ok(())
    }
}
