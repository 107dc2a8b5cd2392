//! Local show/hide controls. No network, no stored state: every click reads
//! the target's current visibility and flips it.

use tracing::debug;

use crate::view::{Element, Visibility};

pub const ACCORDION_ACTIVE_CLASS: &str = "active";

/// Button text for the two panel states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabels {
    pub show: String,
    pub hide: String,
}

impl ToggleLabels {
    pub fn new(show: &str, hide: &str) -> Self {
        Self {
            show: show.to_string(),
            hide: hide.to_string(),
        }
    }
}

/// A button that shows and hides one panel, optionally relabeling itself.
#[derive(Debug, Clone)]
pub struct PanelToggle {
    button: Element,
    panel: Element,
    labels: Option<ToggleLabels>,
}

impl PanelToggle {
    pub fn new(button: Element, panel: Element) -> Self {
        Self {
            button,
            panel,
            labels: None,
        }
    }

    /// Collapsible section: the panel is the button's next sibling.
    pub fn collapsible(button: Element) -> Option<Self> {
        let panel = button.next_sibling()?;
        Some(Self::new(button, panel))
    }

    pub fn with_labels(mut self, labels: ToggleLabels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    pub fn panel(&self) -> &Element {
        &self.panel
    }

    /// Flips the panel and returns its new visibility.
    pub fn click(&self) -> Visibility {
        let next = self.panel.visibility().flipped();
        self.apply(next);
        debug!(panel = ?self.panel.id(), ?next, "panel toggled");
        next
    }

    /// Collapses the panel and restores the "show" label.
    pub fn reset(&self) {
        self.apply(Visibility::Hidden);
    }

    fn apply(&self, visibility: Visibility) {
        self.panel.set_visibility(visibility);
        if let Some(labels) = &self.labels {
            let label = match visibility {
                Visibility::Visible => &labels.hide,
                Visibility::Hidden => &labels.show,
            };
            self.button.set_text(label);
        }
    }
}

/// Accordion item: clicking its button toggles the `active` class on the container.
#[derive(Debug, Clone)]
pub struct AccordionToggle {
    container: Element,
}

impl AccordionToggle {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    /// Binds to the button's parent element.
    pub fn for_button(button: &Element) -> Option<Self> {
        button.parent().map(Self::new)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Returns whether the item is now active.
    pub fn click(&self) -> bool {
        let active = self.container.toggle_class(ACCORDION_ACTIVE_CLASS);
        debug!(container = ?self.container.id(), active, "accordion toggled");
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_toggle() -> PanelToggle {
        PanelToggle::new(
            Element::new("button").with_text("Show Retrieved Keywords"),
            Element::new("div").hidden(),
        )
        .with_labels(ToggleLabels::new(
            "Show Retrieved Keywords",
            "Hide Retrieved Keywords",
        ))
    }

    #[test]
    fn test_click_flips_and_relabels() {
        let toggle = labeled_toggle();
        assert_eq!(toggle.click(), Visibility::Visible);
        assert_eq!(toggle.button().text(), "Hide Retrieved Keywords");
        assert_eq!(toggle.click(), Visibility::Hidden);
        assert_eq!(toggle.button().text(), "Show Retrieved Keywords");
    }

    #[test]
    fn test_two_clicks_restore_original_visibility() {
        for initial in [Visibility::Hidden, Visibility::Visible] {
            let toggle = PanelToggle::new(Element::new("button"), Element::new("div"));
            toggle.panel().set_visibility(initial);
            toggle.click();
            toggle.click();
            assert_eq!(toggle.panel().visibility(), initial);
        }
    }

    #[test]
    fn test_toggle_follows_external_visibility_changes() {
        let toggle = labeled_toggle();
        toggle.panel().show();
        assert_eq!(toggle.click(), Visibility::Hidden);
    }

    #[test]
    fn test_collapsible_targets_next_sibling() {
        let parent = Element::new("div");
        let button = Element::new("button").with_class("collapsible-button");
        let panel = Element::new("div").hidden();
        parent.append_child(&button);
        parent.append_child(&panel);

        let toggle = PanelToggle::collapsible(button).unwrap();
        toggle.click();
        assert!(panel.is_visible());
        assert!(PanelToggle::collapsible(Element::new("button")).is_none());
    }

    #[test]
    fn test_accordion_toggles_parent_class() {
        let item = Element::new("div").with_class("accordion-item");
        let button = Element::new("button").with_class("accordion-button");
        item.append_child(&button);

        let accordion = AccordionToggle::for_button(&button).unwrap();
        assert!(accordion.click());
        assert!(item.has_class(ACCORDION_ACTIVE_CLASS));
        assert!(!accordion.click());
        assert!(!item.has_class(ACCORDION_ACTIVE_CLASS));
    }

    #[test]
    fn test_accordion_items_are_independent() {
        let first = Element::new("div");
        let second = Element::new("div");
        AccordionToggle::new(first.clone()).click();
        assert!(first.has_class(ACCORDION_ACTIVE_CLASS));
        assert!(!second.has_class(ACCORDION_ACTIVE_CLASS));
    }
}
