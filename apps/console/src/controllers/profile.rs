use tracing::{debug, info};

use super::form::FormBinding;
use super::toggle::PanelToggle;
use crate::api_client::{profile_from_reply, Reply, GENERATE_PROFILE_PATH};
use crate::errors::ConsoleError;
use crate::models::profile::split_keywords;
use crate::models::{ProfileEnvelope, ProfileRequest};
use crate::view::{Element, Notifier};

/// Elements the profile form renders into.
#[derive(Debug, Clone)]
pub struct ProfileOutputs {
    pub output_section: Element,
    pub elevator_pitch: Element,
    pub about_me: Element,
    pub keywords_section: Element,
    pub keywords_content: Element,
    pub reason_section: Element,
    pub reason_content: Element,
    /// Reset to its "show" label whenever the reason is re-rendered.
    pub reason_toggle: Option<PanelToggle>,
}

/// Binding for the profile generation form.
pub struct ProfileBinding {
    outputs: ProfileOutputs,
}

impl ProfileBinding {
    pub fn new(outputs: ProfileOutputs) -> Self {
        Self { outputs }
    }

    pub fn outputs(&self) -> &ProfileOutputs {
        &self.outputs
    }
}

impl FormBinding for ProfileBinding {
    type Request = ProfileRequest;
    type Reply = ProfileEnvelope;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn endpoint(&self) -> &'static str {
        GENERATE_PROFILE_PATH
    }

    fn collect(&self, form: &Element) -> ProfileRequest {
        ProfileRequest {
            profession: form.field_value("profession"),
            experience_level: form.field_value("experience-level"),
            keywords: split_keywords(&form.field_value("keywords")),
            background: optional_field(form, "background"),
            resume: optional_field(form, "resume"),
            target_goal: optional_field(form, "target-goal"),
        }
    }

    fn render(
        &self,
        reply: Reply<ProfileEnvelope>,
        _form: &Element,
        _notifier: &dyn Notifier,
    ) -> Result<(), ConsoleError> {
        let profile = profile_from_reply(reply)?;
        let out = &self.outputs;

        out.output_section.show();
        out.elevator_pitch.set_text(profile.elevator_pitch_text());
        out.about_me.set_text(profile.about_me_text());

        let keywords = profile.keywords();
        if keywords.is_empty() {
            out.keywords_section.hide();
        } else {
            out.keywords_content.set_text(&keywords.join(", "));
            out.keywords_section.show();
        }

        match profile.reason_text() {
            Some(reason) => {
                out.reason_content.set_text(reason);
                out.reason_section.show();
                match &out.reason_toggle {
                    Some(toggle) => toggle.reset(),
                    None => out.reason_content.hide(),
                }
            }
            None => out.reason_section.hide(),
        }

        debug!(keywords = keywords.len(), "profile sections rendered");
        info!(
            has_reason = profile.reason_text().is_some(),
            "profile output shown"
        );
        Ok(())
    }
}

/// Optional inputs are sent only when the form has the field and it is filled in.
fn optional_field(form: &Element, name: &str) -> Option<String> {
    form.find_field(name)
        .map(|field| field.value())
        .filter(|value| !value.trim().is_empty())
}
