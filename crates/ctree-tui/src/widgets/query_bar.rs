//! Query bar widget — the search text input at the top of the screen.
//!
//! The query string and cursor live in the core
//! [`SearchController`](ctree_core::controller::SearchController); this
//! widget is a pure projection of that state.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct QueryBar<'a> {
    query: &'a str,
    /// Byte offset of the text cursor within `query`.
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(query: &'a str, cursor: usize, focused: bool, theme: &'a Theme) -> Self {
        Self { query, cursor, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.query[..self.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(" Coaching Tree ")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.query.is_empty() {
            Line::from(Span::styled("type to search coaches", self.theme.hint))
        } else {
            Line::from(self.query)
        };
        Paragraph::new(line).render(inner, buf);
    }
}
