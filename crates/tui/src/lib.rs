//! # Stackwatch terminal dashboard
//!
//! A ratatui front end for [`stackwatch_engine::DashboardClient`]: status
//! badge, dependency and metric rows, the record table, a form for new
//! records and the log panel. The client mutates its view model from
//! background tasks; this crate only reads snapshots and turns key presses
//! into client operations.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use stackwatch_engine::DashboardClient;

/// Run the dashboard until the user quits.
///
/// Starts the client's auto-refresh (with an immediate first cycle) and stops
/// it again on exit. The terminal is restored even when the loop fails.
pub async fn run(client: Arc<DashboardClient>) -> Result<()> {
    ui::runtime::run_app(client).await
}
