//! Dashboard configuration.
//!
//! Values are resolved in layers: built-in defaults, then the persisted
//! preferences file, then environment variables. The CLI applies its flags on
//! top of the result.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::preferences::PreferencesPayload;

pub const BASE_URL_ENV: &str = "STACKWATCH_BASE_URL";
pub const API_PREFIX_ENV: &str = "STACKWATCH_API_PREFIX";
pub const REFRESH_SECS_ENV: &str = "STACKWATCH_REFRESH_SECS";
pub const LOCALE_ENV: &str = "STACKWATCH_LOCALE";
pub const SKIP_OVERLAP_ENV: &str = "STACKWATCH_SKIP_OVERLAP";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_REFRESH_SECS: u64 = 30;
/// Longest accepted refresh period (one day).
pub const MAX_REFRESH_SECS: u64 = 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds from 1 to 86400; got '{value}'")]
    InvalidRefreshInterval { var: String, value: String },
    #[error("unknown locale '{0}'; expected 'ru' or 'en'")]
    UnknownLocale(String),
    #[error("{var} must be a boolean; got '{value}'")]
    InvalidBool { var: String, value: String },
}

/// Which localized strings and date layout the dashboard uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocaleId {
    #[default]
    Russian,
    English,
}

impl LocaleId {
    pub fn code(self) -> &'static str {
        match self {
            LocaleId::Russian => "ru",
            LocaleId::English => "en",
        }
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LocaleId {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ru" | "ru-ru" | "russian" => Ok(LocaleId::Russian),
            "en" | "en-us" | "en-gb" | "english" => Ok(LocaleId::English),
            _ => Err(ConfigError::UnknownLocale(value.to_string())),
        }
    }
}

/// Fully resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub refresh_interval: Duration,
    pub locale: LocaleId,
    /// Skip a timer tick while the previous refresh cycle is still running.
    pub skip_overlapping_cycles: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            locale: LocaleId::default(),
            skip_overlapping_cycles: false,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then preferences, then the process environment.
    pub fn resolve(preferences: &PreferencesPayload) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_preferences(preferences);
        config.apply_env_with(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// Stored values that no longer parse are skipped with a warning.
    pub fn apply_preferences(&mut self, preferences: &PreferencesPayload) {
        if let Some(locale) = preferences.preferred_locale.as_deref() {
            match locale.parse() {
                Ok(locale) => self.locale = locale,
                Err(error) => warn!(%error, "ignoring stored locale preference"),
            }
        }
        if let Some(seconds) = preferences.refresh_interval_secs {
            match refresh_interval_from("preferences.refresh_interval_secs", &seconds.to_string()) {
                Ok(interval) => self.refresh_interval = interval,
                Err(error) => warn!(%error, "ignoring stored refresh interval preference"),
            }
        }
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let read = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        if let Some(base_url) = read(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(prefix) = read(API_PREFIX_ENV) {
            self.api_prefix = prefix;
        }
        if let Some(seconds) = read(REFRESH_SECS_ENV) {
            self.refresh_interval = refresh_interval_from(REFRESH_SECS_ENV, &seconds)?;
        }
        if let Some(locale) = read(LOCALE_ENV) {
            self.locale = locale.parse()?;
        }
        if let Some(flag) = read(SKIP_OVERLAP_ENV) {
            self.skip_overlapping_cycles = parse_bool(SKIP_OVERLAP_ENV, &flag)?;
        }
        Ok(())
    }
}

/// Parse a refresh period in whole seconds, from one second to one day.
pub fn refresh_interval_from(var: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if (1..=MAX_REFRESH_SECS).contains(&seconds) => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidRefreshInterval {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
