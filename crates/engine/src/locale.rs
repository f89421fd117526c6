//! Localized presentation strings and date layouts.
//!
//! Rendering code never inlines language or calendar conventions; it asks a
//! [`Localizer`] instead.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Local};
use stackwatch_types::{DependencyStatus, OverallStatus};
use stackwatch_util::LocaleId;

use crate::view::ViewField;

pub trait Localizer: Send + Sync + Debug {
    fn locale(&self) -> LocaleId;

    /// Text next to the overall status badge.
    fn badge_text(&self, status: OverallStatus) -> &'static str;

    fn dependency_text(&self, status: DependencyStatus) -> &'static str {
        match status {
            DependencyStatus::Connected => "✓ Online",
            DependencyStatus::Disconnected => "✗ Offline",
        }
    }

    /// Caption for a display target.
    fn label(&self, field: ViewField) -> &'static str;

    /// Single row shown by an empty record table.
    fn no_data(&self) -> &'static str {
        "No data available"
    }

    /// Record creation timestamps.
    fn format_timestamp(&self, timestamp: &DateTime<Local>) -> String;

    /// Wall-clock time for "last updated".
    fn format_clock(&self, timestamp: &DateTime<Local>) -> String {
        timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RussianLocale;

impl Localizer for RussianLocale {
    fn locale(&self) -> LocaleId {
        LocaleId::Russian
    }

    fn badge_text(&self, status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Healthy => "✓ Все системы в норме",
            OverallStatus::Unhealthy => "✗ Некоторые компоненты недоступны",
        }
    }

    fn label(&self, field: ViewField) -> &'static str {
        match field {
            ViewField::Status => "Статус",
            ViewField::DatabaseStatus => "PostgreSQL",
            ViewField::CacheStatus => "Redis",
            ViewField::MetricsCollectorStatus => "Prometheus",
            ViewField::DashboardRendererStatus => "Grafana",
            ViewField::TotalRecords => "Всего записей",
            ViewField::CacheKeys => "Ключей в кэше",
            ViewField::CacheMemory => "Память кэша",
            ViewField::CacheHitRate => "Hit rate",
            ViewField::LastUpdated => "Обновлено",
        }
    }

    /// `DD.MM.YYYY HH:MM:SS`, 24-hour.
    fn format_timestamp(&self, timestamp: &DateTime<Local>) -> String {
        timestamp.format("%d.%m.%Y %H:%M:%S").to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLocale;

impl Localizer for EnglishLocale {
    fn locale(&self) -> LocaleId {
        LocaleId::English
    }

    fn badge_text(&self, status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Healthy => "✓ All systems operational",
            OverallStatus::Unhealthy => "✗ Some components are unavailable",
        }
    }

    fn label(&self, field: ViewField) -> &'static str {
        match field {
            ViewField::Status => "Status",
            ViewField::DatabaseStatus => "PostgreSQL",
            ViewField::CacheStatus => "Redis",
            ViewField::MetricsCollectorStatus => "Prometheus",
            ViewField::DashboardRendererStatus => "Grafana",
            ViewField::TotalRecords => "Total records",
            ViewField::CacheKeys => "Cache keys",
            ViewField::CacheMemory => "Cache memory",
            ViewField::CacheHitRate => "Hit rate",
            ViewField::LastUpdated => "Last updated",
        }
    }

    fn format_timestamp(&self, timestamp: &DateTime<Local>) -> String {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

pub fn localizer_for(locale: LocaleId) -> Arc<dyn Localizer> {
    match locale {
        LocaleId::Russian => Arc::new(RussianLocale),
        LocaleId::English => Arc::new(EnglishLocale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn russian_dates_use_day_first_24h_layout() {
        let timestamp = Local.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(RussianLocale.format_timestamp(&timestamp), "02.01.2024 15:04:05");
        assert_eq!(RussianLocale.format_clock(&timestamp), "15:04:05");
    }

    #[test]
    fn badge_text_depends_on_status() {
        assert_eq!(RussianLocale.badge_text(OverallStatus::Healthy), "✓ Все системы в норме");
        assert_eq!(RussianLocale.badge_text(OverallStatus::Unhealthy), "✗ Некоторые компоненты недоступны");
        assert_eq!(EnglishLocale.dependency_text(DependencyStatus::Disconnected), "✗ Offline");
    }

    #[test]
    fn factory_matches_locale_id() {
        assert_eq!(localizer_for(LocaleId::English).locale(), LocaleId::English);
        assert_eq!(localizer_for(LocaleId::Russian).locale(), LocaleId::Russian);
    }
}
