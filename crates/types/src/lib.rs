//! Shared type definitions for Stackwatch.
//!
//! These types mirror the JSON payloads exchanged with the monitored backend
//! (health, overview, records, cache administration) plus the client-local
//! log entry model used by the dashboard.

pub mod cache;
pub mod health;
pub mod log;
pub mod overview;
pub mod record;

pub use cache::{CacheDeleteResult, CacheEntry, CacheKeyList, NewCacheEntry};
pub use health::{Dependency, DependencyStatus, HealthReport, OverallStatus};
pub use log::{LogEntry, Severity};
pub use overview::{CacheOverview, DatabaseOverview, OverviewMetrics};
pub use record::{ApiErrorBody, NewRecord, Record, RecordId, RecordList};
