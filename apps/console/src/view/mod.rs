//! Headless view model: the nodes the controllers read from and render into.
//!
//! A host mirrors these nodes onto whatever it actually draws (browser DOM,
//! terminal, test assertions). Controllers only ever see `Element` handles
//! passed to them at construction.

mod document;
mod element;
mod notifier;

pub use document::Document;
pub use element::Element;
pub use notifier::{Notifier, RecordingNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

impl Visibility {
    pub fn flipped(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Visible,
            Visibility::Visible => Visibility::Hidden,
        }
    }
}

/// Status colors used by list entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
}

/// One rendered entry of a status list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Bold leading label, e.g. `DB:`.
    pub label: Option<String>,
    pub text: String,
    pub color: Option<Color>,
}

impl ListItem {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            label: None,
            text: text.into(),
            color: Some(color),
        }
    }

    pub fn labeled(label: impl Into<String>, text: impl Into<String>, color: Color) -> Self {
        Self {
            label: Some(label.into()),
            text: text.into(),
            color: Some(color),
        }
    }

    /// Label and text as one line, the way the entry reads on screen.
    pub fn display_text(&self) -> String {
        match &self.label {
            Some(label) => format!("{label} {}", self.text),
            None => self.text.clone(),
        }
    }
}
