//! Component trait for the dashboard panels.
//!
//! Each panel owns its local UI state, renders itself into a `Rect` and
//! reports side effects back to the runtime as [`Effect`]s instead of calling
//! the dashboard client directly.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Effect};

pub(crate) trait Component {
    /// Handle a key routed to this component.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &App);
}
