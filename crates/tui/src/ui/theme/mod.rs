//! Theme styling for the dashboard.
//!
//! Components never hard-code colors; they ask the active [`Theme`] for
//! semantic styles instead.

use std::env;

use tracing::debug;

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

pub const THEME_ENV: &str = "TUI_THEME";

/// Select a theme from `TUI_THEME`, falling back to the default Nord palette.
pub fn load() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).ok();
    load_named(requested.as_deref())
}

pub fn load_named(name: Option<&str>) -> Box<dyn Theme> {
    match name.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("nord-high-contrast" | "nord_high_contrast" | "high-contrast") => Box::new(NordThemeHighContrast::new()),
        Some("nord") | None => Box::new(NordTheme::new()),
        Some(other) => {
            debug!(theme = other, "unknown theme requested; using nord");
            Box::new(NordTheme::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_contrast_is_selectable_by_name() {
        let default = load_named(None);
        let high_contrast = load_named(Some("Nord-High-Contrast"));
        assert_ne!(default.roles().text, high_contrast.roles().text);
        assert_eq!(load_named(Some("solarized")).roles().text, default.roles().text);
    }
}
