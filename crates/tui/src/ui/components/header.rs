//! Header: overall status badge, auto-refresh state and last update time.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use stackwatch_engine::ViewField;

use super::Component;
use crate::app::App;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let localizer = app.client.localizer();
        let status = app.view.bindings.get(ViewField::Status);

        let block = th::block(theme, Some("Stackwatch".to_string()), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let refresh = if app.view.auto_refresh {
            Span::styled(
                format!("auto-refresh every {}s", app.client.settings().interval.as_secs()),
                theme.text_muted_style(),
            )
        } else {
            Span::styled("auto-refresh paused", theme.status_warning())
        };
        let left = Line::from(vec![
            Span::styled(status.text.clone(), theme.binding_style(status.class)),
            Span::raw("  "),
            refresh,
        ]);
        frame.render_widget(Paragraph::new(left), inner);

        let right = Line::from(vec![
            Span::styled(format!("{}: ", localizer.label(ViewField::LastUpdated)), theme.text_muted_style()),
            Span::styled(
                app.view.bindings.text(ViewField::LastUpdated).to_string(),
                theme.accent_primary_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), inner);
    }
}
