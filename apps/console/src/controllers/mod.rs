//! Event handlers for the profile page.
//!
//! Each controller owns handles to its own elements and shares nothing with
//! the others. All failures stop at the handler boundary and become a
//! visible message.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::view::Element;

pub mod feedback;
pub mod form;
pub mod health;
pub mod profile;
pub mod skills;
pub mod toggle;

pub use feedback::FeedbackBinding;
pub use form::{FormBinding, FormController};
pub use health::HealthController;
pub use profile::{ProfileBinding, ProfileOutputs};
pub use skills::KeywordsPrefill;
pub use toggle::{AccordionToggle, PanelToggle, ToggleLabels};

/// What a network-backed handler did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The reply was rendered into the view.
    Rendered,
    /// The round-trip failed; the message is what the user was shown.
    Failed(String),
    /// A request from this controller was still in flight; nothing was sent.
    Busy,
}

/// Marks a controller busy and disables its trigger control until dropped,
/// so a cancelled handler future still releases both.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    control: Option<&'a Element>,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool, control: Option<&'a Element>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        if let Some(control) = control {
            control.set_disabled(true);
        }
        Some(Self { flag, control })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(control) = self.control {
            control.set_disabled(false);
        }
        self.flag.store(false, Ordering::Release);
    }
}
