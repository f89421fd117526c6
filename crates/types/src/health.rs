//! Health endpoint payload and its interpretation.

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Wire value the backend uses for a fully healthy service.
pub const HEALTHY: &str = "healthy";
/// Wire value the backend uses for a reachable dependency.
pub const CONNECTED: &str = "connected";

/// Raw body of `GET /health`.
///
/// Every field is optional; the interpretation helpers treat anything that is
/// not an exact match as the negative state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default, deserialize_with = "text_or_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub database: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub cache: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub prometheus: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub grafana: Option<String>,
}

/// Keep string values; any other JSON value (bool, number, object, null)
/// becomes `None` instead of failing the whole body.
fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Text(text) => Some(text),
        Field::Other(_) => None,
    })
}

/// Overall badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Unhealthy,
}

/// Per-dependency connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Connected,
    Disconnected,
}

impl DependencyStatus {
    /// Exact match against `"connected"`; anything else, including an absent
    /// field, is disconnected.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some(CONNECTED) => Self::Connected,
            _ => Self::Disconnected,
        }
    }

    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }

    /// CSS-like class name used by presentation layers.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

/// The four backing services reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependency {
    Database,
    Cache,
    MetricsCollector,
    DashboardRenderer,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [
        Dependency::Database,
        Dependency::Cache,
        Dependency::MetricsCollector,
        Dependency::DashboardRenderer,
    ];

    /// Field name in the health payload.
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Cache => "cache",
            Self::MetricsCollector => "prometheus",
            Self::DashboardRenderer => "grafana",
        }
    }

    /// Human label shown next to the status.
    pub fn label(self) -> &'static str {
        match self {
            Self::Database => "PostgreSQL",
            Self::Cache => "Redis",
            Self::MetricsCollector => "Prometheus",
            Self::DashboardRenderer => "Grafana",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl HealthReport {
    /// Badge state: only the literal `"healthy"` counts as healthy.
    pub fn overall(&self) -> OverallStatus {
        match self.status.as_deref() {
            Some(HEALTHY) => OverallStatus::Healthy,
            _ => OverallStatus::Unhealthy,
        }
    }

    pub fn dependency(&self, dependency: Dependency) -> DependencyStatus {
        let raw = match dependency {
            Dependency::Database => self.database.as_deref(),
            Dependency::Cache => self.cache.as_deref(),
            Dependency::MetricsCollector => self.prometheus.as_deref(),
            Dependency::DashboardRenderer => self.grafana.as_deref(),
        };
        DependencyStatus::from_wire(raw)
    }

    /// All dependencies in display order with their interpreted state.
    pub fn dependencies(&self) -> impl Iterator<Item = (Dependency, DependencyStatus)> + '_ {
        Dependency::ALL.into_iter().map(|dependency| (dependency, self.dependency(dependency)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_literal_healthy_is_online() {
        let mut report = HealthReport {
            status: Some("healthy".into()),
            ..HealthReport::default()
        };
        assert_eq!(report.overall(), OverallStatus::Healthy);

        for other in ["Healthy", "degraded", "", "unhealthy"] {
            report.status = Some(other.into());
            assert_eq!(report.overall(), OverallStatus::Unhealthy, "status {other:?}");
        }

        report.status = None;
        assert_eq!(report.overall(), OverallStatus::Unhealthy);
    }

    #[test]
    fn dependency_requires_exact_connected() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": "healthy",
            "database": "connected",
            "cache": "Connected",
            "prometheus": "disconnected"
        }))
        .unwrap();

        let states: Vec<_> = report.dependencies().collect();
        assert_eq!(
            states,
            vec![
                (Dependency::Database, DependencyStatus::Connected),
                (Dependency::Cache, DependencyStatus::Disconnected),
                (Dependency::MetricsCollector, DependencyStatus::Disconnected),
                (Dependency::DashboardRenderer, DependencyStatus::Disconnected),
            ]
        );
    }

    #[test]
    fn non_string_fields_read_as_negative_states() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": 1,
            "database": "connected",
            "cache": false,
            "prometheus": { "state": "connected" },
            "grafana": ["connected"]
        }))
        .unwrap();

        assert_eq!(report.overall(), OverallStatus::Unhealthy);
        assert_eq!(
            report.dependencies().collect::<Vec<_>>(),
            vec![
                (Dependency::Database, DependencyStatus::Connected),
                (Dependency::Cache, DependencyStatus::Disconnected),
                (Dependency::MetricsCollector, DependencyStatus::Disconnected),
                (Dependency::DashboardRenderer, DependencyStatus::Disconnected),
            ]
        );

        let report: HealthReport = serde_json::from_value(json!({ "status": true, "database": 0 })).unwrap();
        assert_eq!(report.overall(), OverallStatus::Unhealthy);
        assert!(!report.dependency(Dependency::Database).is_connected());
    }

    #[test]
    fn unknown_fields_and_nulls_are_tolerated() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": null,
            "grafana": "connected",
            "uptime": 12
        }))
        .unwrap();
        assert_eq!(report.overall(), OverallStatus::Unhealthy);
        assert!(report.dependency(Dependency::DashboardRenderer).is_connected());
    }
}
