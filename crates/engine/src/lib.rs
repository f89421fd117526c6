//! Stackwatch dashboard engine.
//!
//! [`DashboardClient`] drives the refresh cycle against a
//! [`stackwatch_api::DashboardBackend`] and keeps a [`view::DashboardView`]
//! up to date. Presentation layers (the terminal UI, the HTML snapshot, the
//! headless watcher) only read the view and call the client's operations.

pub mod client;
pub mod locale;
pub mod snapshot;
pub mod view;

pub use client::{CreateOutcome, CycleFailure, CycleOutcome, CycleStage, DashboardClient, RefreshSettings};
pub use locale::{EnglishLocale, Localizer, RussianLocale, localizer_for};
pub use snapshot::render_html_snapshot;
pub use view::{DashboardView, StyleClass, ViewField};
