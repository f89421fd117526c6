//! One-shot subcommands.

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use stackwatch_api::{DashboardBackend, StackwatchClient};
use stackwatch_engine::view::RecordTable;
use stackwatch_engine::{CreateOutcome, CycleOutcome, DashboardClient, DashboardView, ViewField, localizer_for, render_html_snapshot};
use stackwatch_types::{LogEntry, NewCacheEntry, OverallStatus};
use stackwatch_util::preferences::{PreferencesPayload, UserPreferences};
use stackwatch_util::{DashboardConfig, truncate_with_ellipsis};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{info, warn};

const NAME_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 32;

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print everything already queued on a log subscription.
fn drain_logs(receiver: &mut broadcast::Receiver<LogEntry>) {
    loop {
        match receiver.try_recv() {
            Ok(entry) => println!("{}", entry.display_line()),
            Err(TryRecvError::Lagged(skipped)) => warn!(skipped, "log output lagged"),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// Exits with failure when the backend reports itself unhealthy.
pub async fn health(client: &StackwatchClient, config: &DashboardConfig) -> Result<ExitCode> {
    let localizer = localizer_for(config.locale);
    let report = client.health().await.context("health check failed")?;
    let overall = report.overall();

    println!("{}", localizer.badge_text(overall));
    for (dependency, status) in report.dependencies() {
        println!("  {:<12} {}", dependency.label(), localizer.dependency_text(status));
    }

    Ok(match overall {
        OverallStatus::Healthy => ExitCode::SUCCESS,
        OverallStatus::Unhealthy => ExitCode::FAILURE,
    })
}

pub async fn overview(client: &StackwatchClient, config: &DashboardConfig) -> Result<ExitCode> {
    let localizer = localizer_for(config.locale);
    let overview = client.overview().await.context("failed to load the system overview")?;

    let mut view = DashboardView::default();
    view.apply_overview(&overview);
    for field in ViewField::METRICS {
        println!("{:<16} {}", localizer.label(field), view.bindings.text(field));
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn list_records(client: &StackwatchClient, config: &DashboardConfig, html: bool) -> Result<ExitCode> {
    let localizer = localizer_for(config.locale);
    let listing = client.list_records().await.context("failed to load records")?;
    if !listing.success {
        bail!("the backend reported a failure while listing records");
    }

    let table = RecordTable::from_records(listing.data.as_deref(), &*localizer);
    if html {
        println!("{}", table.to_html(localizer.no_data()));
        return Ok(ExitCode::SUCCESS);
    }
    if table.is_empty() {
        println!("{}", localizer.no_data());
        return Ok(ExitCode::SUCCESS);
    }

    let [id, name, value, created] = RecordTable::COLUMNS;
    println!("{id:<8} {name:<nw$} {value:<vw$} {created}", nw = NAME_WIDTH, vw = VALUE_WIDTH);
    for row in table.rows() {
        println!(
            "{:<8} {:<nw$} {:<vw$} {}",
            row.id,
            truncate_with_ellipsis(&row.name, NAME_WIDTH),
            truncate_with_ellipsis(&row.value, VALUE_WIDTH),
            row.created_at,
            nw = NAME_WIDTH,
            vw = VALUE_WIDTH,
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Submit through the dashboard client so validation and messages match the
/// terminal dashboard; every log entry produced is printed.
pub async fn create_record(client: Arc<DashboardClient>, name: &str, value: &str) -> Result<ExitCode> {
    let mut logs = client.subscribe_logs();
    let outcome = client.create_record(name, value).await;
    drain_logs(&mut logs);

    Ok(match outcome {
        CreateOutcome::Created(record) => {
            info!(id = %record.id, "record created");
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    })
}

pub async fn cache_keys(client: &StackwatchClient) -> Result<ExitCode> {
    print_json(&client.cache_keys().await.context("failed to list cache keys")?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn cache_get(client: &StackwatchClient, key: &str) -> Result<ExitCode> {
    print_json(&client.cache_get(key).await.with_context(|| format!("failed to read cache key '{key}'"))?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn cache_set(client: &StackwatchClient, key: String, value: String, ttl: Option<u64>) -> Result<ExitCode> {
    let entry = NewCacheEntry { key, value, ttl };
    print_json(&client.cache_set(&entry).await.with_context(|| format!("failed to store cache key '{}'", entry.key))?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn cache_delete(client: &StackwatchClient, key: &str) -> Result<ExitCode> {
    print_json(&client.cache_delete(key).await.with_context(|| format!("failed to delete cache key '{key}'"))?)?;
    Ok(ExitCode::SUCCESS)
}

/// Refresh once and render the view. A failed cycle still produces a page;
/// the error is visible in its log list.
pub async fn snapshot(client: Arc<DashboardClient>, out: Option<&Path>) -> Result<ExitCode> {
    let outcome = client.refresh().await;
    let html = render_html_snapshot(&client.snapshot(), client.localizer());

    match out {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "snapshot written");
        }
        None => println!("{html}"),
    }

    Ok(match outcome {
        CycleOutcome::Completed => ExitCode::SUCCESS,
        CycleOutcome::Aborted(stage) => {
            warn!(%stage, "snapshot taken after a failed refresh");
            ExitCode::FAILURE
        }
    })
}

/// Run the refresh loop headless until Ctrl+C, echoing the log panel.
pub async fn watch(client: Arc<DashboardClient>) -> Result<ExitCode> {
    let mut logs = client.subscribe_logs();
    client.launch();

    loop {
        tokio::select! {
            received = logs.recv() => match received {
                Ok(entry) => println!("{}", entry.display_line()),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "log output lagged"),
                Err(RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("cannot listen for Ctrl+C")?;
                break;
            }
        }
    }

    client.stop();
    Ok(ExitCode::SUCCESS)
}

/// Print the stored preferences, replacing them first when `update` is set.
pub fn preferences(store: &UserPreferences, update: Option<PreferencesPayload>) -> Result<ExitCode> {
    if let Some(payload) = update {
        store
            .set_preferred_locale(payload.preferred_locale)
            .and_then(|_| store.set_refresh_interval_secs(payload.refresh_interval_secs))
            .with_context(|| format!("cannot write {}", store.path().display()))?;
        info!(path = %store.path().display(), "preferences saved");
    }
    print_json(&store.snapshot())?;
    Ok(ExitCode::SUCCESS)
}
