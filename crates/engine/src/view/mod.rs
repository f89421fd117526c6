//! Dashboard view model.
//!
//! [`DashboardView`] is everything a presentation layer needs to draw the
//! dashboard. The `apply_*` methods are the only way fetched payloads reach
//! it, so display state is always a function of the last successful fetch
//! for each endpoint.

mod bindings;
mod form;
mod logs;
mod table;

pub use bindings::{Binding, StyleClass, ViewBindings, ViewField};
pub use form::{FormField, RecordForm};
pub use logs::{LOG_CAPACITY, LogPanel};
pub use table::{RecordRow, RecordTable};

use chrono::{DateTime, Local};
use stackwatch_types::{HealthReport, LogEntry, OverviewMetrics, Record};
use stackwatch_util::{format_count, format_hit_rate, format_memory_mb};

use crate::locale::Localizer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    pub bindings: ViewBindings,
    pub table: RecordTable,
    pub logs: LogPanel,
    pub form: RecordForm,
    /// Whether the auto-refresh timer is running.
    pub auto_refresh: bool,
}

impl DashboardView {
    pub fn apply_health(&mut self, report: &HealthReport, localizer: &dyn Localizer) {
        let overall = report.overall();
        self.bindings.set(ViewField::Status, localizer.badge_text(overall), overall.into());

        for (dependency, status) in report.dependencies() {
            self.bindings
                .set(ViewField::for_dependency(dependency), localizer.dependency_text(status), status.into());
        }
    }

    /// Missing sections leave their targets untouched.
    pub fn apply_overview(&mut self, overview: &OverviewMetrics) {
        use StyleClass::Plain;

        if let Some(database) = &overview.database {
            self.bindings.set(ViewField::TotalRecords, format_count(database.total_records), Plain);
        }
        if let Some(cache) = &overview.cache {
            self.bindings.set(ViewField::CacheKeys, format_count(cache.keys), Plain);
            self.bindings.set(ViewField::CacheMemory, format_memory_mb(cache.memory_mb), Plain);
            self.bindings.set(ViewField::CacheHitRate, format_hit_rate(cache.hit_rate), Plain);
        }
    }

    pub fn apply_records(&mut self, records: Option<&[Record]>, localizer: &dyn Localizer) {
        self.table = RecordTable::from_records(records, localizer);
    }

    pub fn mark_updated(&mut self, at: &DateTime<Local>, localizer: &dyn Localizer) {
        self.bindings
            .set(ViewField::LastUpdated, localizer.format_clock(at), StyleClass::Plain);
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::RussianLocale;
    use stackwatch_types::{CacheOverview, DatabaseOverview};

    #[test]
    fn unhealthy_or_missing_status_renders_offline_badge() {
        let mut view = DashboardView::default();
        view.apply_health(
            &HealthReport {
                status: Some("degraded".into()),
                database: Some("connected".into()),
                ..HealthReport::default()
            },
            &RussianLocale,
        );

        assert_eq!(view.bindings.class(ViewField::Status), StyleClass::Offline);
        assert_eq!(view.bindings.text(ViewField::Status), "✗ Некоторые компоненты недоступны");
        assert_eq!(view.bindings.class(ViewField::DatabaseStatus), StyleClass::Connected);
        assert_eq!(view.bindings.text(ViewField::DatabaseStatus), "✓ Online");
        assert_eq!(view.bindings.class(ViewField::CacheStatus), StyleClass::Disconnected);
        assert_eq!(view.bindings.class(ViewField::DashboardRendererStatus), StyleClass::Disconnected);
    }

    #[test]
    fn healthy_status_renders_online_badge() {
        let mut view = DashboardView::default();
        view.apply_health(
            &HealthReport {
                status: Some("healthy".into()),
                ..HealthReport::default()
            },
            &RussianLocale,
        );
        assert_eq!(view.bindings.class(ViewField::Status), StyleClass::Online);
        assert_eq!(view.bindings.text(ViewField::Status), "✓ Все системы в норме");
    }

    #[test]
    fn overview_fields_render_values_or_placeholders() {
        let mut view = DashboardView::default();
        view.apply_overview(&OverviewMetrics {
            database: Some(DatabaseOverview { total_records: Some(0) }),
            cache: Some(CacheOverview {
                keys: None,
                memory_mb: Some(2.5),
                hit_rate: Some(0.873),
            }),
        });

        assert_eq!(view.bindings.text(ViewField::TotalRecords), "0");
        assert_eq!(view.bindings.text(ViewField::CacheKeys), "-");
        assert_eq!(view.bindings.text(ViewField::CacheMemory), "2.5 MB");
        assert_eq!(view.bindings.text(ViewField::CacheHitRate), "87.3%");
    }

    #[test]
    fn missing_sections_keep_previous_values() {
        let mut view = DashboardView::default();
        view.apply_overview(&OverviewMetrics {
            database: Some(DatabaseOverview { total_records: Some(9) }),
            cache: Some(CacheOverview {
                keys: Some(4),
                memory_mb: None,
                hit_rate: Some(1.0),
            }),
        });
        view.apply_overview(&OverviewMetrics::default());

        assert_eq!(view.bindings.text(ViewField::TotalRecords), "9");
        assert_eq!(view.bindings.text(ViewField::CacheKeys), "4");
        assert_eq!(view.bindings.text(ViewField::CacheHitRate), "100.0%");
    }
}
