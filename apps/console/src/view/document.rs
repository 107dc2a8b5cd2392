use super::Element;

/// Root of a headless page. Lookups walk the tree on every call, so nodes
/// appended after binding are still found.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.body
            .descendants()
            .into_iter()
            .find(|node| node.id().as_deref() == Some(id))
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.body
            .descendants()
            .into_iter()
            .filter(|node| node.has_class(class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_and_class() {
        let document = Document::new();
        let section = Element::new("section").with_id("output-section");
        let button = Element::new("button").with_class("accordion-button");
        section.append_child(&button);
        document.body().append_child(&section);

        assert!(document
            .get_element_by_id("output-section")
            .unwrap()
            .same_node(&section));
        assert!(document.get_element_by_id("nope").is_none());
        assert_eq!(document.elements_with_class("accordion-button").len(), 1);
    }
}
