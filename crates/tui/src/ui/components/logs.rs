//! Log panel, newest entry first.

use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem};

use super::Component;
use crate::app::App;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct LogsComponent;

impl Component for LogsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let logs = &app.view.logs;
        let block = th::block(theme, Some(format!("Log ({})", logs.len())), false);

        let items: Vec<ListItem> = logs
            .entries()
            .map(|entry| {
                let clock = app.client.localizer().format_clock(&entry.timestamp);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{clock}] "), theme.text_muted_style()),
                    Span::styled(entry.message.clone(), theme.severity_style(entry.severity)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), rect);
    }
}
