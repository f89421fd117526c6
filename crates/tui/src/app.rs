//! Application state shared by the runtime and the components.

use std::sync::Arc;

use stackwatch_engine::view::FormField;
use stackwatch_engine::{DashboardClient, DashboardView};

use crate::ui::theme::Theme;

/// Which part of the dashboard receives keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Records,
    Input(FormField),
}

impl Focus {
    /// Tab order: record table, name input, value input.
    pub fn next(self) -> Self {
        match self {
            Focus::Records => Focus::Input(FormField::Name),
            Focus::Input(FormField::Name) => Focus::Input(FormField::Value),
            Focus::Input(FormField::Value) => Focus::Records,
        }
    }
}

/// Side effects requested by key handling, executed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    ShowRecentRecords,
    SubmitForm,
    ToggleAutoRefresh,
    Quit,
}

pub struct App {
    pub client: Arc<DashboardClient>,
    pub theme: Box<dyn Theme>,
    pub focus: Focus,
    /// Copy of the client's view taken at the last sync.
    pub view: DashboardView,
    synced_revision: Option<u64>,
}

impl App {
    pub fn new(client: Arc<DashboardClient>, theme: Box<dyn Theme>) -> Self {
        Self {
            client,
            theme,
            focus: Focus::default(),
            view: DashboardView::default(),
            synced_revision: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.focus, Focus::Input(_))
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Pull a fresh view from the client when it changed since the last call.
    /// Returns whether anything changed.
    pub fn sync(&mut self) -> bool {
        let revision = self.client.revision();
        if self.synced_revision == Some(revision) {
            return false;
        }
        self.view = self.client.snapshot();
        self.synced_revision = Some(revision);
        true
    }

    /// Apply an edit to the focused form input.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        let Focus::Input(field) = self.focus else {
            return;
        };
        self.client.update_view(|view| edit(view.form.field_mut(field)));
        self.sync();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use stackwatch_api::{ClientError, DashboardBackend};
    use stackwatch_engine::{DashboardClient, RefreshSettings, RussianLocale};
    use stackwatch_types::{HealthReport, NewRecord, OverviewMetrics, Record, RecordList};

    use super::App;
    use crate::ui::theme::NordTheme;

    /// Backend that never answers anything useful; key handling tests only
    /// inspect state and effects.
    pub struct IdleBackend;

    #[async_trait]
    impl DashboardBackend for IdleBackend {
        async fn health(&self) -> Result<HealthReport, ClientError> {
            Ok(HealthReport::default())
        }

        async fn overview(&self) -> Result<OverviewMetrics, ClientError> {
            Ok(OverviewMetrics::default())
        }

        async fn list_records(&self) -> Result<RecordList, ClientError> {
            Ok(RecordList::default())
        }

        async fn create_record(&self, _record: &NewRecord) -> Result<Record, ClientError> {
            Err(ClientError::RateLimited)
        }
    }

    pub fn app() -> App {
        let client = DashboardClient::new(Arc::new(IdleBackend), Arc::new(RussianLocale), RefreshSettings::default());
        App::new(client, Box::new(NordTheme::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_table_and_inputs() {
        let mut app = test_support::app();
        assert!(!app.is_editing());
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Input(FormField::Name));
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Input(FormField::Value));
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Records);
    }

    #[test]
    fn sync_only_reports_changes_once() {
        let mut app = test_support::app();
        assert!(app.sync());
        assert!(!app.sync());
        app.client.update_view(|view| view.form.name.push('a'));
        assert!(app.sync());
        assert_eq!(app.view.form.name, "a");
    }

    #[test]
    fn edits_only_apply_while_an_input_is_focused() {
        let mut app = test_support::app();
        app.edit_input(|text| text.push('x'));
        assert!(app.view.form.name.is_empty());

        app.focus = Focus::Input(FormField::Value);
        app.edit_input(|text| text.push_str("42"));
        assert_eq!(app.view.form.value, "42");
        assert_eq!(app.client.snapshot().form.value, "42");
    }
}
