//! Helpers shared by the Stackwatch dashboard, TUI and CLI.

pub mod config;
pub mod date_handling;
pub mod formatting;
pub mod html;
pub mod paths;
pub mod preferences;

pub use config::{ConfigError, DashboardConfig, LocaleId};
pub use formatting::{PLACEHOLDER, format_count, format_hit_rate, format_memory_mb, truncate_with_ellipsis};
pub use html::escape_html;
pub use paths::{config_file_path, expand_tilde};
