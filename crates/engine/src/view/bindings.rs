//! View binding table: display targets keyed by semantic field name.

use indexmap::IndexMap;
use stackwatch_types::{Dependency, DependencyStatus, OverallStatus};
use stackwatch_util::PLACEHOLDER;

/// Every scalar display target on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewField {
    Status,
    DatabaseStatus,
    CacheStatus,
    MetricsCollectorStatus,
    DashboardRendererStatus,
    TotalRecords,
    CacheKeys,
    CacheMemory,
    CacheHitRate,
    LastUpdated,
}

impl ViewField {
    pub const ALL: [ViewField; 10] = [
        ViewField::Status,
        ViewField::DatabaseStatus,
        ViewField::CacheStatus,
        ViewField::MetricsCollectorStatus,
        ViewField::DashboardRendererStatus,
        ViewField::TotalRecords,
        ViewField::CacheKeys,
        ViewField::CacheMemory,
        ViewField::CacheHitRate,
        ViewField::LastUpdated,
    ];

    pub const METRICS: [ViewField; 4] = [
        ViewField::TotalRecords,
        ViewField::CacheKeys,
        ViewField::CacheMemory,
        ViewField::CacheHitRate,
    ];

    pub fn for_dependency(dependency: Dependency) -> Self {
        match dependency {
            Dependency::Database => ViewField::DatabaseStatus,
            Dependency::Cache => ViewField::CacheStatus,
            Dependency::MetricsCollector => ViewField::MetricsCollectorStatus,
            Dependency::DashboardRenderer => ViewField::DashboardRendererStatus,
        }
    }

    /// Stable identifier used as the element id in HTML output.
    pub fn element_id(self) -> &'static str {
        match self {
            ViewField::Status => "statusText",
            ViewField::DatabaseStatus => "dbStatus",
            ViewField::CacheStatus => "cacheStatus",
            ViewField::MetricsCollectorStatus => "prometheusStatus",
            ViewField::DashboardRendererStatus => "grafanaStatus",
            ViewField::TotalRecords => "totalRecords",
            ViewField::CacheKeys => "cacheKeys",
            ViewField::CacheMemory => "cacheMemory",
            ViewField::CacheHitRate => "cacheHitRate",
            ViewField::LastUpdated => "lastUpdated",
        }
    }
}

/// Presentation class attached to a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Nothing fetched yet.
    #[default]
    Pending,
    Online,
    Offline,
    Connected,
    Disconnected,
    Plain,
}

impl StyleClass {
    pub fn class_name(self) -> &'static str {
        match self {
            StyleClass::Pending => "pending",
            StyleClass::Online => "online",
            StyleClass::Offline => "offline",
            StyleClass::Connected => "connected",
            StyleClass::Disconnected => "disconnected",
            StyleClass::Plain => "plain",
        }
    }
}

impl From<OverallStatus> for StyleClass {
    fn from(status: OverallStatus) -> Self {
        match status {
            OverallStatus::Healthy => StyleClass::Online,
            OverallStatus::Unhealthy => StyleClass::Offline,
        }
    }
}

impl From<DependencyStatus> for StyleClass {
    fn from(status: DependencyStatus) -> Self {
        match status {
            DependencyStatus::Connected => StyleClass::Connected,
            DependencyStatus::Disconnected => StyleClass::Disconnected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub text: String,
    pub class: StyleClass,
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            class: StyleClass::Pending,
        }
    }
}

/// Current text and class of every [`ViewField`], in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBindings {
    targets: IndexMap<ViewField, Binding>,
}

impl Default for ViewBindings {
    fn default() -> Self {
        Self {
            targets: ViewField::ALL.into_iter().map(|field| (field, Binding::default())).collect(),
        }
    }
}

impl ViewBindings {
    pub fn set(&mut self, field: ViewField, text: impl Into<String>, class: StyleClass) {
        self.targets.insert(
            field,
            Binding {
                text: text.into(),
                class,
            },
        );
    }

    pub fn get(&self, field: ViewField) -> &Binding {
        // Every field is seeded in `default`, so the lookup cannot miss.
        &self.targets[&field]
    }

    pub fn text(&self, field: ViewField) -> &str {
        &self.get(field).text
    }

    pub fn class(&self, field: ViewField) -> StyleClass {
        self.get(field).class
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewField, &Binding)> {
        self.targets.iter().map(|(field, binding)| (*field, binding))
    }
}
