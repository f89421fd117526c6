//! The dashboard client: refresh scheduling, fetch interpretation, record
//! creation and the log panel.
//!
//! Responsibilities
//! - Run refresh cycles: health, then overview, then the record list, each
//!   awaiting the previous one. The first failure aborts the rest of the
//!   cycle and is logged as a single error entry.
//! - Own the auto-refresh timer (`start`/`stop`). Every tick spawns an
//!   independent cycle, so a slow cycle may overlap the next one unless
//!   `skip_overlapping_cycles` is set. Stopping the timer never cancels a
//!   cycle that is already running.
//! - Submit new records and report the outcome in the log panel.
//!
//! Errors never escape this type; they end up in the log panel and in
//! `tracing` output, and the view keeps its last good values.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Local;
use stackwatch_api::{ClientError, DashboardBackend};
use stackwatch_types::{LogEntry, NewRecord, Record, Severity};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::locale::Localizer;
use crate::view::DashboardView;

/// Default auto-refresh period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

const LOG_BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    pub interval: Duration,
    /// Skip a tick while an earlier cycle is still in flight.
    pub skip_overlapping_cycles: bool,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            skip_overlapping_cycles: false,
        }
    }
}

/// The fetch a refresh cycle was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    Health,
    Overview,
    Records,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CycleStage::Health => "health",
            CycleStage::Overview => "overview",
            CycleStage::Records => "records",
        })
    }
}

#[derive(Debug, Error)]
#[error("{stage} fetch failed: {source}")]
pub struct CycleFailure {
    pub stage: CycleStage,
    #[source]
    pub source: ClientError,
}

impl CycleFailure {
    fn at(stage: CycleStage) -> impl FnOnce(ClientError) -> Self {
        move |source| Self { stage, source }
    }

    /// Text for the single log entry a failed cycle produces.
    fn log_message(&self) -> String {
        match self.stage {
            CycleStage::Health => format!("Health check failed: {}", self.source),
            CycleStage::Overview | CycleStage::Records => format!("Failed to refresh data: {}", self.source),
        }
    }
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    Aborted(CycleStage),
}

/// Result of one record submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Record),
    /// Empty name; no request was sent.
    Invalid,
    RateLimited,
    Rejected { status: u16, message: String },
    Failed(String),
}

/// Decrements the in-flight counter however the cycle future ends.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct DashboardClient {
    backend: Arc<dyn DashboardBackend>,
    localizer: Arc<dyn Localizer>,
    settings: RefreshSettings,
    view: Mutex<DashboardView>,
    timer: Mutex<Option<JoinHandle<()>>>,
    cycles_started: AtomicU64,
    cycles_in_flight: AtomicUsize,
    revision: AtomicU64,
    log_events: broadcast::Sender<LogEntry>,
}

impl fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardClient")
            .field("settings", &self.settings)
            .field("locale", &self.localizer.locale())
            .field("cycles_started", &self.cycles_started())
            .field("auto_refresh", &self.is_auto_refreshing())
            .finish_non_exhaustive()
    }
}

impl DashboardClient {
    pub fn new(backend: Arc<dyn DashboardBackend>, localizer: Arc<dyn Localizer>, settings: RefreshSettings) -> Arc<Self> {
        let (log_events, _) = broadcast::channel(LOG_BROADCAST_CAPACITY);
        Arc::new(Self {
            backend,
            localizer,
            settings,
            view: Mutex::new(DashboardView::default()),
            timer: Mutex::new(None),
            cycles_started: AtomicU64::new(0),
            cycles_in_flight: AtomicUsize::new(0),
            revision: AtomicU64::new(0),
            log_events,
        })
    }

    pub fn localizer(&self) -> &dyn Localizer {
        &*self.localizer
    }

    pub fn settings(&self) -> RefreshSettings {
        self.settings
    }

    /// Copy of the current view for rendering.
    pub fn snapshot(&self) -> DashboardView {
        self.lock_view().clone()
    }

    /// Mutate the view (for example the form inputs) and bump the revision.
    pub fn update_view<R>(&self, apply: impl FnOnce(&mut DashboardView) -> R) -> R {
        let result = apply(&mut self.lock_view());
        self.revision.fetch_add(1, Ordering::SeqCst);
        result
    }

    /// Monotonic counter bumped on every view change; renderers compare it
    /// to decide whether to redraw.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn cycles_started(&self) -> u64 {
        self.cycles_started.load(Ordering::SeqCst)
    }

    pub fn cycles_in_flight(&self) -> usize {
        self.cycles_in_flight.load(Ordering::SeqCst)
    }

    /// Receive every log panel entry as it is appended.
    pub fn subscribe_logs(&self) -> broadcast::Receiver<LogEntry> {
        self.log_events.subscribe()
    }

    fn lock_view(&self) -> MutexGuard<'_, DashboardView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a timestamped entry to the log panel.
    pub fn log(&self, message: impl Into<String>, severity: Severity) {
        let entry = LogEntry::new(message, severity);
        match severity {
            Severity::Error => warn!(message = %entry.message, "dashboard error"),
            Severity::Warning => warn!(message = %entry.message, "dashboard warning"),
            Severity::Info | Severity::Success => debug!(message = %entry.message, severity = %severity, "dashboard log"),
        }
        self.update_view(|view| view.push_log(entry.clone()));
        // No subscribers is fine.
        let _ = self.log_events.send(entry);
    }

    /// Run one refresh cycle: health → overview → records.
    pub async fn refresh(&self) -> CycleOutcome {
        let cycle = self.cycles_started.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::enter(&self.cycles_in_flight);
        debug!(cycle, "refresh cycle started");

        match self.run_cycle().await {
            Ok(()) => {
                let now = Local::now();
                self.update_view(|view| view.mark_updated(&now, &*self.localizer));
                debug!(cycle, "refresh cycle completed");
                CycleOutcome::Completed
            }
            Err(failure) => {
                warn!(cycle, stage = %failure.stage, error = %failure.source, "refresh cycle aborted");
                self.log(failure.log_message(), Severity::Error);
                CycleOutcome::Aborted(failure.stage)
            }
        }
    }

    async fn run_cycle(&self) -> Result<(), CycleFailure> {
        let health = self.backend.health().await.map_err(CycleFailure::at(CycleStage::Health))?;
        self.update_view(|view| view.apply_health(&health, &*self.localizer));

        let overview = self.backend.overview().await.map_err(CycleFailure::at(CycleStage::Overview))?;
        self.update_view(|view| view.apply_overview(&overview));

        let listing = self.backend.list_records().await.map_err(CycleFailure::at(CycleStage::Records))?;
        if listing.success {
            let records = listing.data.as_deref();
            let count = listing
                .count
                .unwrap_or_else(|| records.map_or(0, |records| records.len() as u64));
            self.update_view(|view| view.apply_records(records, &*self.localizer));
            self.log(format!("Loaded {count} records"), Severity::Success);
        }
        Ok(())
    }

    /// Log a notice and refresh immediately.
    pub async fn show_recent_records(&self) -> CycleOutcome {
        self.log("Showing recent records...", Severity::Info);
        self.refresh().await
    }

    /// Submit a new record. Exactly one request is sent for a non-empty name.
    ///
    /// On `201` the form inputs are cleared and one full refresh runs before
    /// this returns.
    pub async fn create_record(&self, name: &str, value: &str) -> CreateOutcome {
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            self.log("Please enter a name", Severity::Warning);
            return CreateOutcome::Invalid;
        }

        let request = NewRecord {
            name: name.to_string(),
            value: value.to_string(),
        };
        match self.backend.create_record(&request).await {
            Ok(record) => {
                info!(name = %name, id = %record.id, "record created");
                self.log(format!("Created record: {name}"), Severity::Success);
                self.update_view(|view| view.form.clear());
                self.refresh().await;
                CreateOutcome::Created(record)
            }
            Err(ClientError::RateLimited) => {
                self.log("Too many requests. Please wait.", Severity::Error);
                CreateOutcome::RateLimited
            }
            Err(ClientError::Server { status, message }) => {
                self.log(format!("Error: {message}"), Severity::Error);
                CreateOutcome::Rejected { status, message }
            }
            Err(other) => {
                let message = other.to_string();
                self.log(format!("Failed to create record: {message}"), Severity::Error);
                CreateOutcome::Failed(message)
            }
        }
    }

    /// Submit whatever is currently typed into the form.
    pub async fn submit_form(&self) -> CreateOutcome {
        let form = self.lock_view().form.clone();
        self.create_record(&form.name, &form.value).await
    }

    /// Refresh once now, then keep refreshing on the timer.
    pub fn launch(self: &Arc<Self>) {
        self.spawn_cycle();
        self.start();
    }

    /// Start the auto-refresh timer. No-op when it is already running or the
    /// interval is zero or too large to schedule.
    pub fn start(self: &Arc<Self>) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if timer.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let period = self.settings.interval;
        let first_tick = Instant::now().checked_add(period).filter(|_| !period.is_zero());
        let Some(first_tick) = first_tick else {
            warn!(interval = ?period, "refresh interval cannot be scheduled; auto-refresh stays off");
            return;
        };

        let client = Arc::downgrade(self);
        *timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(client) = client.upgrade() else {
                    break;
                };
                client.on_tick();
            }
        }));
        drop(timer);

        info!(interval_secs = period.as_secs(), "auto-refresh started");
        self.update_view(|view| view.auto_refresh = true);
    }

    /// Stop future ticks. A cycle already running is left to finish.
    pub fn stop(&self) {
        let handle = self.timer.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = handle {
            handle.abort();
            info!("auto-refresh stopped");
        }
        self.update_view(|view| view.auto_refresh = false);
    }

    pub fn restart(self: &Arc<Self>) {
        self.stop();
        self.start();
    }

    /// Flip between running and stopped; returns the new state.
    pub fn toggle_auto_refresh(self: &Arc<Self>) -> bool {
        if self.is_auto_refreshing() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn on_tick(self: &Arc<Self>) {
        if self.settings.skip_overlapping_cycles && self.cycles_in_flight() > 0 {
            debug!(in_flight = self.cycles_in_flight(), "skipping tick while a refresh cycle is running");
            return;
        }
        self.spawn_cycle();
    }

    /// Run a cycle on its own task so the caller is never blocked by it.
    pub fn spawn_cycle(self: &Arc<Self>) -> JoinHandle<CycleOutcome> {
        let client = Arc::clone(self);
        tokio::spawn(async move { client.refresh().await })
    }

    /// Run [`Self::create_record`] on its own task.
    pub fn spawn_submit_form(self: &Arc<Self>) -> JoinHandle<CreateOutcome> {
        let client = Arc::clone(self);
        tokio::spawn(async move { client.submit_form().await })
    }
}

impl Drop for DashboardClient {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}
