//! System overview payload (`GET {api}/system/overview`).

use serde::{Deserialize, Serialize};

/// Aggregated metrics for the database and cache.
///
/// A missing section means "no information" and must leave whatever the
/// dashboard last displayed for that section untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    #[serde(default)]
    pub database: Option<DatabaseOverview>,
    #[serde(default)]
    pub cache: Option<CacheOverview>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseOverview {
    #[serde(default)]
    pub total_records: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheOverview {
    #[serde(default)]
    pub keys: Option<u64>,
    #[serde(default)]
    pub memory_mb: Option<f64>,
    /// Fraction of lookups served from the cache, `0.0..=1.0`.
    #[serde(default)]
    pub hit_rate: Option<f64>,
}
