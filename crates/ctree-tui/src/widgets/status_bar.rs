//! Status bar — the single line at the bottom of the screen.
//!
//! Shows, in priority order: the search error message, the most recent
//! selection, or a keybinding hint.

use crate::theme::Theme;
use ctree_core::Coach;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    error: Option<&'a str>,
    selected: Option<&'a Coach>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(error: Option<&'a str>, selected: Option<&'a Coach>, theme: &'a Theme) -> Self {
        Self { error, selected, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if let Some(msg) = self.error {
            Line::from(Span::styled(format!(" {msg}"), self.theme.error))
        } else if let Some(coach) = self.selected {
            Line::from(vec![
                Span::raw(" Selected "),
                Span::raw(coach.name.as_str()),
                Span::styled(format!(" [{}]", coach.id), self.theme.id),
            ])
        } else {
            Line::from(Span::styled(
                " Enter: select   Tab: switch pane   ?: help   q: quit",
                self.theme.hint,
            ))
        };
        Paragraph::new(line).render(area, buf);
    }
}
