//! Keyboard shortcut strip at the bottom of the screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Component;
use crate::app::App;

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl HintBarComponent {
    pub fn hints(editing: bool) -> &'static [(&'static str, &'static str)] {
        if editing {
            &[
                ("Enter", " create  "),
                ("Tab", " next field  "),
                ("Esc", " leave form  "),
                ("F5", " refresh  "),
                ("Ctrl+C", " quit"),
            ]
        } else {
            &[
                ("Tab", " form  "),
                ("↑/↓", " select  "),
                ("F5/Ctrl+R", " refresh  "),
                ("r", " recent  "),
                ("p", " pause/resume  "),
                ("q", " quit"),
            ]
        }
    }
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let mut spans = vec![Span::styled("Hints: ", theme.text_muted_style())];
        for (key, action) in Self::hints(app.is_editing()) {
            spans.push(Span::styled(*key, theme.accent_emphasis_style()));
            spans.push(Span::styled(*action, theme.text_muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rect);
    }
}
