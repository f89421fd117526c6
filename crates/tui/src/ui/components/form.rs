//! New record form: name and value inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use stackwatch_engine::view::FormField;
use unicode_width::UnicodeWidthStr;

use super::Component;
use crate::app::{App, Effect, Focus};
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct FormComponent;

impl FormComponent {
    fn label(field: FormField) -> &'static str {
        match field {
            FormField::Name => "Name",
            FormField::Value => "Value",
        }
    }
}

impl Component for FormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => return vec![Effect::SubmitForm],
            KeyCode::Esc => app.focus = Focus::Records,
            KeyCode::Backspace => app.edit_input(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.edit_input(|text| text.push(c));
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let [name_area, value_area] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).areas(rect);

        for (field, area) in [(FormField::Name, name_area), (FormField::Value, value_area)] {
            let focused = app.focus == Focus::Input(field);
            let text = app.view.form.field(field);
            let block = th::block(theme, Some(Self::label(field).to_string()), focused);
            let inner = block.inner(area);

            frame.render_widget(
                Paragraph::new(text.to_string()).style(th::input_style(theme, focused)).block(block),
                area,
            );
            if focused {
                let offset = (text.width() as u16).min(inner.width.saturating_sub(1));
                frame.set_cursor_position((inner.x + offset, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_the_focused_input() {
        let mut app = test_support::app();
        app.focus = Focus::Input(FormField::Name);
        let mut form = FormComponent;
        for c in "abc".chars() {
            form.handle_key_events(&mut app, key(KeyCode::Char(c)));
        }
        form.handle_key_events(&mut app, key(KeyCode::Backspace));
        form.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));

        assert_eq!(app.view.form.name, "ab");
        assert!(app.view.form.value.is_empty());
    }

    #[test]
    fn enter_submits_and_escape_leaves_the_input() {
        let mut app = test_support::app();
        app.focus = Focus::Input(FormField::Value);
        let mut form = FormComponent;

        assert_eq!(form.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::SubmitForm]);
        assert!(form.handle_key_events(&mut app, key(KeyCode::Esc)).is_empty());
        assert_eq!(app.focus, Focus::Records);
    }
}
