//! Profile console: headless controllers for the profile generator page.
//!
//! A host builds (or mirrors) a [`view::Document`], binds a
//! [`page::ProfilePage`] to it with an [`api_client::ApiTransport`], and
//! forwards click and submit events. Controllers render replies back into
//! the document and report failures through a [`view::Notifier`].

pub mod api_client;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod page;
pub mod telemetry;
pub mod view;

pub use api_client::{ApiTransport, HttpTransport};
pub use config::Config;
pub use controllers::Outcome;
pub use errors::ConsoleError;
pub use page::ProfilePage;
