use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stackwatch_api::{ClientError, DashboardBackend};
use stackwatch_engine::{
    CreateOutcome, CycleOutcome, CycleStage, DashboardClient, RefreshSettings, RussianLocale, StyleClass, ViewField,
};
use stackwatch_types::{
    CacheOverview, DatabaseOverview, HealthReport, NewRecord, OverviewMetrics, Record, RecordId, RecordList, Severity,
};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy)]
enum CreateBehavior {
    Created,
    RateLimited,
    ServerError,
    NotJson,
}

struct StubBackend {
    calls: Mutex<Vec<&'static str>>,
    created: Mutex<Vec<NewRecord>>,
    fail_health: AtomicBool,
    fail_overview: AtomicBool,
    fail_records: AtomicBool,
    health_gate: Option<Arc<Semaphore>>,
    create_behavior: Mutex<CreateBehavior>,
}

impl StubBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self::build(None))
    }

    fn gated(gate: Arc<Semaphore>) -> Arc<Self> {
        Arc::new(Self::build(Some(gate)))
    }

    fn build(health_gate: Option<Arc<Semaphore>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_health: AtomicBool::new(false),
            fail_overview: AtomicBool::new(false),
            fail_records: AtomicBool::new(false),
            health_gate,
            create_behavior: Mutex::new(CreateBehavior::Created),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn set_create_behavior(&self, behavior: CreateBehavior) {
        *self.create_behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl DashboardBackend for StubBackend {
    async fn health(&self) -> Result<HealthReport, ClientError> {
        if let Some(gate) = &self.health_gate {
            let _permit = gate.acquire().await.unwrap();
        }
        self.record("health");
        if self.fail_health.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 502,
                message: "bad gateway".into(),
            });
        }
        Ok(HealthReport {
            status: Some("healthy".into()),
            database: Some("connected".into()),
            cache: Some("connected".into()),
            prometheus: Some("connected".into()),
            grafana: Some("disconnected".into()),
        })
    }

    async fn overview(&self) -> Result<OverviewMetrics, ClientError> {
        self.record("overview");
        if self.fail_overview.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 503,
                message: "metrics unavailable".into(),
            });
        }
        Ok(OverviewMetrics {
            database: Some(DatabaseOverview { total_records: Some(2) }),
            cache: Some(CacheOverview {
                keys: Some(7),
                memory_mb: Some(1.25),
                hit_rate: Some(0.5),
            }),
        })
    }

    async fn list_records(&self) -> Result<RecordList, ClientError> {
        self.record("list");
        if self.fail_records.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 500,
                message: "query failed".into(),
            });
        }
        Ok(RecordList {
            success: true,
            data: Some(vec![
                Record {
                    id: RecordId::Number(1),
                    name: "first".into(),
                    value: Some("a".into()),
                    created_at: None,
                },
                Record {
                    id: RecordId::Number(2),
                    name: "second".into(),
                    value: None,
                    created_at: None,
                },
            ]),
            count: Some(2),
        })
    }

    async fn create_record(&self, record: &NewRecord) -> Result<Record, ClientError> {
        self.record("create");
        self.created.lock().unwrap().push(record.clone());
        match *self.create_behavior.lock().unwrap() {
            CreateBehavior::Created => Ok(Record {
                id: RecordId::Number(3),
                name: record.name.clone(),
                value: Some(record.value.clone()),
                created_at: None,
            }),
            CreateBehavior::RateLimited => Err(ClientError::RateLimited),
            CreateBehavior::ServerError => Err(ClientError::Server {
                status: 500,
                message: "db exploded".into(),
            }),
            CreateBehavior::NotJson => Err(ClientError::Decode {
                path: "/api/test".into(),
                source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            }),
        }
    }
}

fn client_with(backend: Arc<StubBackend>, settings: RefreshSettings) -> Arc<DashboardClient> {
    DashboardClient::new(backend, Arc::new(RussianLocale), settings)
}

fn client(backend: Arc<StubBackend>) -> Arc<DashboardClient> {
    client_with(backend, RefreshSettings::default())
}

/// Let spawned tasks run until they block.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn refresh_fetches_health_then_overview_then_records() {
    let backend = StubBackend::new();
    let client = client(backend.clone());

    assert_eq!(client.refresh().await, CycleOutcome::Completed);
    assert_eq!(backend.calls(), vec!["health", "overview", "list"]);

    let view = client.snapshot();
    assert_eq!(view.bindings.class(ViewField::Status), StyleClass::Online);
    assert_eq!(view.bindings.class(ViewField::DashboardRendererStatus), StyleClass::Disconnected);
    assert_eq!(view.bindings.text(ViewField::CacheKeys), "7");
    assert_eq!(view.bindings.text(ViewField::CacheMemory), "1.25 MB");
    assert_eq!(view.bindings.text(ViewField::CacheHitRate), "50.0%");
    assert_ne!(view.bindings.text(ViewField::LastUpdated), "-");
    assert_eq!(view.table.rows().len(), 2);
    assert_eq!(view.table.rows()[1].value, "-");

    let latest = view.logs.latest().unwrap();
    assert_eq!(latest.message, "Loaded 2 records");
    assert_eq!(latest.severity, Severity::Success);
}

#[tokio::test]
async fn failing_health_aborts_the_cycle_with_one_error_entry() {
    let backend = StubBackend::new();
    let client = client(backend.clone());
    client.refresh().await;
    let before = client.snapshot();
    backend.clear_calls();

    backend.fail_health.store(true, Ordering::SeqCst);
    assert_eq!(client.refresh().await, CycleOutcome::Aborted(CycleStage::Health));
    assert_eq!(backend.calls(), vec!["health"]);

    let after = client.snapshot();
    assert_eq!(after.logs.len(), before.logs.len() + 1);
    let latest = after.logs.latest().unwrap();
    assert_eq!(latest.severity, Severity::Error);
    assert_eq!(latest.message, "Health check failed: bad gateway");
    assert_eq!(after.bindings, before.bindings);
    assert_eq!(after.table, before.table);
}

#[tokio::test]
async fn failing_overview_skips_the_record_list() {
    let backend = StubBackend::new();
    let client = client(backend.clone());
    client.refresh().await;
    let before = client.snapshot();
    backend.clear_calls();

    backend.fail_overview.store(true, Ordering::SeqCst);
    assert_eq!(client.refresh().await, CycleOutcome::Aborted(CycleStage::Overview));
    assert_eq!(backend.calls(), vec!["health", "overview"]);

    let after = client.snapshot();
    assert_eq!(after.logs.len(), before.logs.len() + 1);
    let latest = after.logs.latest().unwrap();
    assert_eq!(latest.severity, Severity::Error);
    assert_eq!(latest.message, "Failed to refresh data: metrics unavailable");
    assert_eq!(after.bindings, before.bindings);
    assert_eq!(after.table, before.table);
}

#[tokio::test]
async fn failing_record_list_keeps_the_previous_table() {
    let backend = StubBackend::new();
    let client = client(backend.clone());
    client.refresh().await;
    let before = client.snapshot();

    backend.fail_records.store(true, Ordering::SeqCst);
    assert_eq!(client.refresh().await, CycleOutcome::Aborted(CycleStage::Records));

    let after = client.snapshot();
    assert_eq!(after.logs.len(), before.logs.len() + 1);
    assert_eq!(after.logs.latest().unwrap().message, "Failed to refresh data: query failed");
    assert_eq!(after.table, before.table);
    assert_eq!(
        after.bindings.text(ViewField::LastUpdated),
        before.bindings.text(ViewField::LastUpdated)
    );
}

#[tokio::test(start_paused = true)]
async fn next_tick_recovers_after_a_failed_cycle() {
    let backend = StubBackend::new();
    let client = client(backend.clone());
    backend.fail_health.store(true, Ordering::SeqCst);
    client.start();

    tokio::time::sleep(Duration::from_secs(31)).await;
    settle().await;
    assert_eq!(client.cycles_started(), 1);
    assert_eq!(client.snapshot().logs.latest().unwrap().severity, Severity::Error);

    backend.fail_health.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(client.cycles_started(), 2);
    let view = client.snapshot();
    assert_eq!(view.logs.latest().unwrap().message, "Loaded 2 records");
    assert_eq!(view.bindings.class(ViewField::Status), StyleClass::Online);
}

#[tokio::test(start_paused = true)]
async fn launch_refreshes_immediately_and_starts_the_timer() {
    let backend = StubBackend::new();
    let client = client(backend.clone());

    client.launch();
    settle().await;

    assert_eq!(client.cycles_started(), 1);
    assert!(client.is_auto_refreshing());
    assert!(client.snapshot().auto_refresh);
    assert_eq!(backend.calls(), vec!["health", "overview", "list"]);
}

#[tokio::test(start_paused = true)]
async fn unschedulable_interval_leaves_auto_refresh_off() {
    let backend = StubBackend::new();
    let settings = RefreshSettings {
        interval: Duration::MAX,
        ..RefreshSettings::default()
    };
    let client = client_with(backend.clone(), settings);

    client.start();
    settle().await;

    assert!(!client.is_auto_refreshing());
    assert!(!client.snapshot().auto_refresh);
    assert_eq!(client.cycles_started(), 0);
}

#[tokio::test]
async fn empty_name_sends_nothing_and_warns_once() {
    let backend = StubBackend::new();
    let client = client(backend.clone());

    assert_eq!(client.create_record("   ", "x").await, CreateOutcome::Invalid);
    assert!(backend.calls().is_empty());

    let view = client.snapshot();
    assert_eq!(view.logs.len(), 1);
    let latest = view.logs.latest().unwrap();
    assert_eq!(latest.message, "Please enter a name");
    assert_eq!(latest.severity, Severity::Warning);
}

#[tokio::test]
async fn created_record_clears_form_and_refreshes_once() {
    let backend = StubBackend::new();
    let client = client(backend.clone());
    client.update_view(|view| {
        view.form.name = " widget ".into();
        view.form.value = "42".into();
    });

    let outcome = client.submit_form().await;
    assert!(matches!(outcome, CreateOutcome::Created(ref record) if record.name == "widget"));
    assert_eq!(backend.calls(), vec!["create", "health", "overview", "list"]);
    assert_eq!(client.cycles_started(), 1);
    assert_eq!(
        backend.created.lock().unwrap().as_slice(),
        &[NewRecord {
            name: "widget".into(),
            value: "42".into(),
        }]
    );

    let view = client.snapshot();
    assert!(view.form.name.is_empty());
    assert!(view.form.value.is_empty());
    assert!(view.logs.entries().any(|entry| entry.message == "Created record: widget"));
}

#[tokio::test]
async fn rate_limited_create_logs_and_skips_refresh() {
    let backend = StubBackend::new();
    backend.set_create_behavior(CreateBehavior::RateLimited);
    let client = client(backend.clone());

    assert_eq!(client.create_record("a", "").await, CreateOutcome::RateLimited);
    assert_eq!(client.cycles_started(), 0);
    let latest = client.snapshot().logs.latest().cloned().unwrap();
    assert_eq!(latest.message, "Too many requests. Please wait.");
    assert_eq!(latest.severity, Severity::Error);
}

#[tokio::test]
async fn server_rejection_shows_the_server_message() {
    let backend = StubBackend::new();
    backend.set_create_behavior(CreateBehavior::ServerError);
    let client = client(backend.clone());

    let outcome = client.create_record("a", "b").await;
    assert_eq!(
        outcome,
        CreateOutcome::Rejected {
            status: 500,
            message: "db exploded".into(),
        }
    );
    assert_eq!(client.snapshot().logs.latest().unwrap().message, "Error: db exploded");
}

#[tokio::test]
async fn undecodable_create_response_is_a_failure() {
    let backend = StubBackend::new();
    backend.set_create_behavior(CreateBehavior::NotJson);
    let client = client(backend.clone());

    assert!(matches!(client.create_record("a", "b").await, CreateOutcome::Failed(_)));
    let latest = client.snapshot().logs.latest().cloned().unwrap();
    assert!(latest.message.starts_with("Failed to create record: "));
    assert_eq!(latest.severity, Severity::Error);
    assert_eq!(backend.calls(), vec!["create"]);
}

#[tokio::test(start_paused = true)]
async fn stop_lets_the_running_cycle_finish_and_prevents_new_ones() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = StubBackend::gated(gate.clone());
    let client = client(backend.clone());
    client.start();

    tokio::time::sleep(Duration::from_secs(31)).await;
    settle().await;
    assert_eq!(client.cycles_in_flight(), 1);

    client.stop();
    assert!(!client.is_auto_refreshing());
    gate.add_permits(10);
    settle().await;

    assert_eq!(client.cycles_in_flight(), 0);
    assert_eq!(backend.calls(), vec!["health", "overview", "list"]);

    tokio::time::sleep(Duration::from_secs(120)).await;
    settle().await;
    assert_eq!(client.cycles_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_cycles_overlap_unless_skipping_is_enabled() {
    let gate = Arc::new(Semaphore::new(0));
    let overlapping = client(StubBackend::gated(gate.clone()));
    overlapping.start();
    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;
    assert_eq!(overlapping.cycles_started(), 2);
    assert_eq!(overlapping.cycles_in_flight(), 2);
    overlapping.stop();

    let skipping = client_with(
        StubBackend::gated(gate.clone()),
        RefreshSettings {
            skip_overlapping_cycles: true,
            ..RefreshSettings::default()
        },
    );
    skipping.start();
    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;
    assert_eq!(skipping.cycles_started(), 1);
    skipping.stop();
}

#[tokio::test]
async fn log_panel_keeps_the_newest_fifty_entries() {
    let client = client(StubBackend::new());
    for n in 0..60 {
        client.log(format!("entry {n}"), Severity::Info);
    }

    let view = client.snapshot();
    assert_eq!(view.logs.len(), 50);
    assert_eq!(view.logs.latest().unwrap().message, "entry 59");
    assert_eq!(view.logs.entries().last().unwrap().message, "entry 10");
}

#[tokio::test]
async fn log_subscribers_see_each_entry() {
    let client = client(StubBackend::new());
    let mut events = client.subscribe_logs();

    client.show_recent_records().await;

    assert_eq!(events.recv().await.unwrap().message, "Showing recent records...");
    assert_eq!(events.recv().await.unwrap().message, "Loaded 2 records");
}

#[tokio::test]
async fn revision_moves_on_every_view_change() {
    let client = client(StubBackend::new());
    let start = client.revision();
    client.update_view(|view| view.form.name.push('x'));
    assert!(client.revision() > start);
}
