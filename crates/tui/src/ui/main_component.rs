//! Root view: lays out the panels and routes keys to the focused one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Block;

use super::components::{
    Component, FormComponent, HeaderComponent, HintBarComponent, LogsComponent, RecordsComponent, StatusRowComponent,
};
use crate::app::{App, Effect, Focus};

#[derive(Debug)]
pub struct MainView {
    header: HeaderComponent,
    services: StatusRowComponent,
    metrics: StatusRowComponent,
    records: RecordsComponent,
    form: FormComponent,
    logs: LogsComponent,
    hints: HintBarComponent,
}

impl Default for MainView {
    fn default() -> Self {
        Self {
            header: HeaderComponent,
            services: StatusRowComponent::services(),
            metrics: StatusRowComponent::metrics(),
            records: RecordsComponent::default(),
            form: FormComponent,
            logs: LogsComponent,
            hints: HintBarComponent,
        }
    }
}

impl MainView {
    /// Global shortcuts first, then the focused panel, then browse-mode keys.
    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if control => return vec![Effect::Quit],
            KeyCode::Char('r') if control => return vec![Effect::Refresh],
            KeyCode::F(5) => return vec![Effect::Refresh],
            KeyCode::Tab => {
                app.cycle_focus();
                return Vec::new();
            }
            _ => {}
        }

        if app.is_editing() {
            return self.form.handle_key_events(app, key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Effect::Quit],
            KeyCode::Char('r') => vec![Effect::ShowRecentRecords],
            KeyCode::Char('p') => vec![Effect::ToggleAutoRefresh],
            KeyCode::Enter => vec![Effect::SubmitForm],
            _ if app.focus == Focus::Records => self.records.handle_key_events(app, key),
            _ => Vec::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Block::default().style(Style::default().bg(app.theme.roles().background)), area);

        let [header, services, metrics, records, form, logs, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .areas(area);

        self.header.render(frame, header, app);
        self.services.render(frame, services, app);
        self.metrics.render(frame, metrics, app);
        self.records.render(frame, records, app);
        self.form.render(frame, form, app);
        self.logs.render(frame, logs, app);
        self.hints.render(frame, hints, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support;
    use stackwatch_engine::view::FormField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn browse_keys_map_to_effects() {
        let mut app = test_support::app();
        let mut main = MainView::default();

        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::Char('r'))), vec![Effect::ShowRecentRecords]);
        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::Char('p'))), vec![Effect::ToggleAutoRefresh]);
        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::F(5))), vec![Effect::Refresh]);
        assert_eq!(main.handle_key_events(&mut app, ctrl('r')), vec![Effect::Refresh]);
        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::Esc)), vec![Effect::Quit]);
    }

    #[test]
    fn letters_are_typed_while_editing() {
        let mut app = test_support::app();
        let mut main = MainView::default();
        main.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Input(FormField::Name));

        for c in ['r', 'p', 'q'] {
            assert!(main.handle_key_events(&mut app, key(KeyCode::Char(c))).is_empty());
        }
        assert_eq!(app.view.form.name, "rpq");

        assert_eq!(main.handle_key_events(&mut app, ctrl('r')), vec![Effect::Refresh]);
        assert_eq!(main.handle_key_events(&mut app, ctrl('c')), vec![Effect::Quit]);
        assert_eq!(main.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::SubmitForm]);
    }
}
