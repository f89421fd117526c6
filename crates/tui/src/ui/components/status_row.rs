//! Rows of labelled bindings: dependency statuses and cache/database metrics.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use stackwatch_engine::ViewField;
use stackwatch_types::Dependency;

use super::Component;
use crate::app::App;
use crate::ui::theme::theme_helpers as th;

/// One bordered cell per field, laid out left to right.
#[derive(Debug)]
pub struct StatusRowComponent {
    title: &'static str,
    fields: Vec<ViewField>,
}

impl StatusRowComponent {
    pub fn services() -> Self {
        Self {
            title: "Services",
            fields: Dependency::ALL.into_iter().map(ViewField::for_dependency).collect(),
        }
    }

    pub fn metrics() -> Self {
        Self {
            title: "Metrics",
            fields: ViewField::METRICS.to_vec(),
        }
    }
}

impl Component for StatusRowComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let localizer = app.client.localizer();

        let block = th::block(theme, Some(self.title.to_string()), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let cells = Layout::horizontal(self.fields.iter().map(|_| Constraint::Fill(1))).split(inner);
        for (field, cell) in self.fields.iter().zip(cells.iter()) {
            let binding = app.view.bindings.get(*field);
            let line = Line::from(vec![
                Span::styled(format!("{} ", localizer.label(*field)), theme.text_secondary_style()),
                Span::styled(binding.text.clone(), theme.binding_style(binding.class)),
            ]);
            frame.render_widget(Paragraph::new(line), *cell);
        }
    }
}
