//! Record table with keyboard row selection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Cell, Row, Table, TableState};
use stackwatch_engine::view::RecordTable;

use super::Component;
use crate::app::{App, Effect, Focus};
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct RecordsComponent {
    state: TableState,
}

impl RecordsComponent {
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    fn select_clamped(&mut self, index: usize, row_count: usize) {
        if row_count == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(index.min(row_count - 1)));
        }
    }
}

impl Component for RecordsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let row_count = app.view.table.rows().len();
        let current = self.state.selected();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_clamped(current.map_or(0, |index| index + 1), row_count);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_clamped(current.map_or(0, |index| index.saturating_sub(1)), row_count);
            }
            KeyCode::Home => self.select_clamped(0, row_count),
            KeyCode::End => self.select_clamped(row_count.saturating_sub(1), row_count),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App) {
        let theme = &*app.theme;
        let table = &app.view.table;
        let focused = app.focus == Focus::Records;
        let block = th::block(theme, Some(format!("Records ({})", table.rows().len())), focused);

        let header = Row::new(RecordTable::COLUMNS.map(Cell::from)).style(th::table_header_row_style(theme));
        let widths = [
            Constraint::Length(8),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(20),
        ];

        let rows: Vec<Row> = if table.is_empty() {
            vec![Row::new(vec![Cell::from(app.client.localizer().no_data()).style(theme.text_muted_style())])]
        } else {
            table
                .rows()
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    Row::new(row.cells().map(|cell| Cell::from(cell.to_string()))).style(th::table_row_style(theme, index))
                })
                .collect()
        };

        // The row list can shrink between refreshes.
        if let Some(selected) = self.state.selected() {
            self.select_clamped(selected, table.rows().len());
        }

        let widget = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(th::table_selected_style(theme));
        frame.render_stateful_widget(widget, rect, &mut self.state);
    }
}
