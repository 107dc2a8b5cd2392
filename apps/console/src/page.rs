//! Page wiring: finds the profile page's elements by id and binds every
//! controller whose elements are present.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::ApiTransport;
use crate::controllers::{
    AccordionToggle, FeedbackBinding, FormController, HealthController, KeywordsPrefill, Outcome,
    PanelToggle, ProfileBinding, ProfileOutputs, ToggleLabels,
};
use crate::view::{Document, Element, Notifier};

/// Element ids the page is wired by.
pub mod ids {
    pub const CHECK_HEALTH: &str = "check-health";
    pub const HEALTH_INDICATORS: &str = "health-indicators";
    pub const FEEDBACK_FORM: &str = "feedback-form";
    pub const PROFILE_FORM: &str = "profile-upgrade-form";
    pub const PROFESSION: &str = "profession";
    pub const EXPERIENCE_LEVEL: &str = "experience-level";
    pub const KEYWORDS: &str = "keywords";
    pub const BACKGROUND: &str = "background";
    pub const FETCH_SKILLS: &str = "fetch-skills-button";
    pub const OUTPUT_SECTION: &str = "output-section";
    pub const ELEVATOR_PITCH: &str = "elevator-pitch-content";
    pub const ABOUT_ME: &str = "about-me-content";
    pub const REASON_SECTION: &str = "reason-section";
    pub const REASON_CONTENT: &str = "reason-content";
    pub const SHOW_REASON: &str = "show-reason-button";
    pub const KEYWORDS_SECTION: &str = "retrieved-keywords-section";
    pub const KEYWORDS_CONTENT: &str = "retrieved-keywords-content";
    pub const TOGGLE_KEYWORDS: &str = "toggle-keywords-button";
}

pub const COLLAPSIBLE_BUTTON_CLASS: &str = "collapsible-button";
pub const ACCORDION_BUTTON_CLASS: &str = "accordion-button";

/// Every controller of the profile page, each present only if its elements are.
pub struct ProfilePage {
    document: Document,
    pub health: Option<HealthController>,
    pub feedback: Option<FormController<FeedbackBinding>>,
    pub profile: Option<FormController<ProfileBinding>>,
    pub skills: Option<KeywordsPrefill>,
    pub keywords_toggle: Option<PanelToggle>,
    pub reason_toggle: Option<PanelToggle>,
    pub accordions: Vec<(Element, AccordionToggle)>,
}

impl ProfilePage {
    pub fn bind(
        document: Document,
        api: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let by_id = |id: &str| document.get_element_by_id(id);

        let health = by_id(ids::CHECK_HEALTH)
            .and(by_id(ids::HEALTH_INDICATORS))
            .map(|list| HealthController::new(list, api.clone()));

        let feedback = by_id(ids::FEEDBACK_FORM)
            .map(|form| FormController::new(form, FeedbackBinding, api.clone(), notifier.clone()));

        let keywords_toggle = match (by_id(ids::TOGGLE_KEYWORDS), by_id(ids::KEYWORDS_CONTENT)) {
            (Some(button), Some(panel)) => Some(PanelToggle::new(button, panel).with_labels(
                ToggleLabels::new("Show Retrieved Keywords", "Hide Retrieved Keywords"),
            )),
            _ => {
                warn!("Toggle keywords button not found in the page");
                None
            }
        };

        let reason_toggle = match (by_id(ids::SHOW_REASON), by_id(ids::REASON_CONTENT)) {
            (Some(button), Some(panel)) => Some(
                PanelToggle::new(button, panel)
                    .with_labels(ToggleLabels::new("Show Reason", "Hide Reason")),
            ),
            _ => {
                warn!("Show reason button not found in the page");
                None
            }
        };

        let profile = by_id(ids::PROFILE_FORM).and_then(|form| {
            let outputs = ProfileOutputs {
                output_section: by_id(ids::OUTPUT_SECTION)?,
                elevator_pitch: by_id(ids::ELEVATOR_PITCH)?,
                about_me: by_id(ids::ABOUT_ME)?,
                keywords_section: by_id(ids::KEYWORDS_SECTION)?,
                keywords_content: by_id(ids::KEYWORDS_CONTENT)?,
                reason_section: by_id(ids::REASON_SECTION)?,
                reason_content: by_id(ids::REASON_CONTENT)?,
                reason_toggle: reason_toggle.clone(),
            };
            Some(FormController::new(
                form,
                ProfileBinding::new(outputs),
                api.clone(),
                notifier.clone(),
            ))
        });
        if by_id(ids::PROFILE_FORM).is_some() && profile.is_none() {
            warn!("profile form present but its output elements are missing");
        }

        let skills = match (
            by_id(ids::FETCH_SKILLS),
            by_id(ids::PROFESSION),
            by_id(ids::KEYWORDS),
        ) {
            (Some(trigger), Some(profession), Some(keywords)) => Some(KeywordsPrefill::new(
                Some(trigger),
                profession,
                keywords,
                api.clone(),
                notifier.clone(),
            )),
            _ => None,
        };

        let accordions = document
            .elements_with_class(ACCORDION_BUTTON_CLASS)
            .into_iter()
            .filter_map(|button| {
                let toggle = AccordionToggle::for_button(&button)?;
                Some((button, toggle))
            })
            .collect();

        let page = Self {
            document,
            health,
            feedback,
            profile,
            skills,
            keywords_toggle,
            reason_toggle,
            accordions,
        };
        info!(
            health = page.health.is_some(),
            feedback = page.feedback.is_some(),
            profile = page.profile.is_some(),
            accordions = page.accordions.len(),
            "profile page bound"
        );
        page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Routes a click to whichever control owns `target`. Returns `None`
    /// when the click was local or nothing handles it.
    pub async fn click(&self, target: &Element) -> Option<Outcome> {
        let id = target.id();
        match id.as_deref() {
            Some(ids::CHECK_HEALTH) => {
                if let Some(health) = &self.health {
                    return Some(health.check().await);
                }
            }
            Some(ids::FETCH_SKILLS) => {
                if let Some(skills) = &self.skills {
                    return Some(skills.prefill().await);
                }
            }
            Some(ids::TOGGLE_KEYWORDS) => {
                if let Some(toggle) = &self.keywords_toggle {
                    toggle.click();
                }
                return None;
            }
            Some(ids::SHOW_REASON) => {
                if let Some(toggle) = &self.reason_toggle {
                    toggle.click();
                }
                return None;
            }
            _ => {}
        }

        if target.has_class(COLLAPSIBLE_BUTTON_CLASS) {
            if let Some(toggle) = PanelToggle::collapsible(target.clone()) {
                toggle.click();
            }
        } else if let Some((_, accordion)) = self
            .accordions
            .iter()
            .find(|(button, _)| button.same_node(target))
        {
            accordion.click();
        }
        None
    }

    /// Routes a submit event to the form's controller.
    pub async fn submit(&self, form: &Element) -> Option<Outcome> {
        if let Some(profile) = self.profile.as_ref().filter(|c| c.form().same_node(form)) {
            return Some(profile.submit().await);
        }
        if let Some(feedback) = self.feedback.as_ref().filter(|c| c.form().same_node(form)) {
            return Some(feedback.submit().await);
        }
        None
    }
}

/// Builds the standard profile page: health panel, feedback form, profile
/// form with its output section, and one collapsible help section.
pub fn standard_document() -> Document {
    let document = Document::new();
    let body = document.body();

    let health_panel = Element::new("section").with_id("health-panel");
    health_panel.append_child(&Element::new("button").with_id(ids::CHECK_HEALTH));
    health_panel.append_child(&Element::new("ul").with_id(ids::HEALTH_INDICATORS));
    body.append_child(&health_panel);

    let feedback = Element::new("form").with_id(ids::FEEDBACK_FORM);
    feedback.append_child(&Element::new("select").with_attr("name", "stars"));
    feedback.append_child(&Element::new("textarea").with_attr("name", "comments"));
    feedback.append_child(&Element::new("button").with_attr("type", "submit"));
    body.append_child(&feedback);

    let form = Element::new("form").with_id(ids::PROFILE_FORM);
    for id in [ids::PROFESSION, ids::EXPERIENCE_LEVEL, ids::KEYWORDS, ids::BACKGROUND] {
        form.append_child(&Element::new("input").with_id(id));
    }
    form.append_child(&Element::new("button").with_id(ids::FETCH_SKILLS));
    form.append_child(&Element::new("button").with_attr("type", "submit"));
    body.append_child(&form);

    let output = Element::new("section").with_id(ids::OUTPUT_SECTION).hidden();
    output.append_child(&Element::new("div").with_id(ids::ELEVATOR_PITCH));
    output.append_child(&Element::new("div").with_id(ids::ABOUT_ME));

    let keywords_section = Element::new("div").with_id(ids::KEYWORDS_SECTION).hidden();
    keywords_section.append_child(
        &Element::new("button")
            .with_id(ids::TOGGLE_KEYWORDS)
            .with_text("Show Retrieved Keywords"),
    );
    keywords_section.append_child(&Element::new("div").with_id(ids::KEYWORDS_CONTENT).hidden());
    output.append_child(&keywords_section);

    let reason_section = Element::new("div").with_id(ids::REASON_SECTION).hidden();
    reason_section.append_child(
        &Element::new("button")
            .with_id(ids::SHOW_REASON)
            .with_text("Show Reason"),
    );
    reason_section.append_child(&Element::new("div").with_id(ids::REASON_CONTENT).hidden());
    output.append_child(&reason_section);
    body.append_child(&output);

    let help = Element::new("div").with_class("accordion-item");
    help.append_child(&Element::new("button").with_class(ACCORDION_BUTTON_CLASS));
    let tips = Element::new("div");
    tips.append_child(&Element::new("button").with_class(COLLAPSIBLE_BUTTON_CLASS));
    tips.append_child(&Element::new("div").hidden());
    help.append_child(&tips);
    body.append_child(&help);

    document
}
