use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{ListItem, Visibility};

#[derive(Debug)]
struct ElementState {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    visibility: Visibility,
    text: String,
    value: String,
    disabled: bool,
    items: Vec<ListItem>,
    parent: Weak<Mutex<ElementState>>,
    children: Vec<Element>,
}

/// Handle to one node of the headless view.
///
/// Cloning the handle shares the node. Each accessor takes the node's lock
/// only for its own duration, so no lock is held across an `.await`.
#[derive(Clone)]
pub struct Element {
    inner: Arc<Mutex<ElementState>>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementState {
                tag: tag.to_string(),
                id: None,
                attributes: BTreeMap::new(),
                classes: BTreeSet::new(),
                visibility: Visibility::Visible,
                text: String::new(),
                value: String::new(),
                disabled: false,
                items: Vec::new(),
                parent: Weak::new(),
                children: Vec::new(),
            })),
        }
    }

    pub fn with_id(self, id: &str) -> Self {
        self.inner.lock().id = Some(id.to_string());
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Starts the node hidden, as toggle targets and output containers do.
    pub fn hidden(self) -> Self {
        self.hide();
        self
    }

    pub fn id(&self) -> Option<String> {
        self.inner.lock().id.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.lock().attributes.get(name).cloned()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.inner
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.lock().classes.contains(class)
    }

    pub fn add_class(&self, class: &str) {
        self.inner.lock().classes.insert(class.to_string());
    }

    /// Flips `class` and reports whether it is now present.
    pub fn toggle_class(&self, class: &str) -> bool {
        let mut state = self.inner.lock();
        if state.classes.remove(class) {
            false
        } else {
            state.classes.insert(class.to_string());
            true
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.inner.lock().visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.inner.lock().visibility = visibility;
    }

    pub fn show(&self) {
        self.set_visibility(Visibility::Visible);
    }

    pub fn hide(&self) {
        self.set_visibility(Visibility::Hidden);
    }

    pub fn text(&self) -> String {
        self.inner.lock().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.inner.lock().text = text.to_string();
    }

    /// Current value of an input-like node.
    pub fn value(&self) -> String {
        self.inner.lock().value.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.inner.lock().value = value.to_string();
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.lock().disabled
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.lock().disabled = disabled;
    }

    pub fn items(&self) -> Vec<ListItem> {
        self.inner.lock().items.clone()
    }

    /// Replaces every list entry at once.
    pub fn replace_items(&self, items: Vec<ListItem>) {
        self.inner.lock().items = items;
    }

    /// Moves `child` to the end of this node's children, detaching it from
    /// any previous parent first.
    pub fn append_child(&self, child: &Element) {
        if let Some(previous) = child.parent() {
            previous
                .inner
                .lock()
                .children
                .retain(|existing| !existing.same_node(child));
        }
        child.inner.lock().parent = Arc::downgrade(&self.inner);
        self.inner.lock().children.push(child.clone());
    }

    pub fn children(&self) -> Vec<Element> {
        self.inner.lock().children.clone()
    }

    pub fn parent(&self) -> Option<Element> {
        let parent = self.inner.lock().parent.upgrade()?;
        Some(Element { inner: parent })
    }

    pub fn next_sibling(&self) -> Option<Element> {
        let siblings = self.parent()?.children();
        let position = siblings.iter().position(|s| s.same_node(self))?;
        siblings.get(position + 1).cloned()
    }

    /// All nodes below this one, depth-first in document order.
    pub fn descendants(&self) -> Vec<Element> {
        let mut found = Vec::new();
        let mut stack: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            found.push(node);
        }
        found
    }

    /// Finds a form field by its `name` attribute, falling back to its id.
    pub fn find_field(&self, name: &str) -> Option<Element> {
        let descendants = self.descendants();
        descendants
            .iter()
            .find(|node| node.attr("name").as_deref() == Some(name))
            .or_else(|| {
                descendants
                    .iter()
                    .find(|node| node.id().as_deref() == Some(name))
            })
            .cloned()
    }

    /// Value of the named field, empty when the field does not exist.
    pub fn field_value(&self, name: &str) -> String {
        self.find_field(name).map(|f| f.value()).unwrap_or_default()
    }

    /// Clears every named field below this node.
    pub fn reset_fields(&self) {
        for node in self.descendants() {
            if node.attr("name").is_some() {
                node.set_value("");
            }
        }
    }

    pub fn same_node(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Element")
            .field("tag", &state.tag)
            .field("id", &state.id)
            .field("visibility", &state.visibility)
            .field("children", &state.children.len())
            .finish()
    }
}
