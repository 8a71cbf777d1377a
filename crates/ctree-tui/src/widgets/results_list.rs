//! Results list widget — the ordered, selectable coach list.
//!
//! # Navigation (when the list is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move the highlight up one row |
//! | `↓` / `j` | Move the highlight down one row |
//! | `Enter`   | Select the highlighted coach |
//!
//! The list scrolls just enough to keep the highlighted row visible.

use crate::theme::Theme;
use ctree_core::Coach;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

pub struct ResultsList<'a> {
    coaches: &'a [Coach],
    selected: usize,
    focused: bool,
    show_ids: bool,
    theme: &'a Theme,
}

impl<'a> ResultsList<'a> {
    pub fn new(
        coaches: &'a [Coach],
        selected: usize,
        focused: bool,
        show_ids: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { coaches, selected, focused, show_ids, theme }
    }
}

/// `(start, end)` — exclusive range of rows visible in a window of `height`
/// rows, scrolled just enough to keep `selected` inside it.
fn visible_window(total: usize, selected: usize, height: usize) -> (usize, usize) {
    let height = height.max(1);
    let start = (selected + 1).saturating_sub(height);
    let end = (start + height).min(total);
    (start, end)
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(format!(" Coaches ({}) ", self.coaches.len()))
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if self.coaches.is_empty() {
            Paragraph::new(Line::from(Span::styled("no matches", self.theme.hint)))
                .render(inner, buf);
            return;
        }

        let (start, end) = visible_window(
            self.coaches.len(),
            self.selected.min(self.coaches.len() - 1),
            inner.height as usize,
        );

        let lines: Vec<Line> = self.coaches[start..end]
            .iter()
            .enumerate()
            .map(|(offset, coach)| {
                let highlighted = start + offset == self.selected;
                let mut spans = vec![if highlighted {
                    Span::styled(format!(" {} ", coach.name), self.theme.selection)
                } else {
                    Span::raw(format!(" {} ", coach.name))
                }];
                if self.show_ids {
                    spans.push(Span::styled(format!("[{}]", coach.id), self.theme.id));
                }
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);

        if self.coaches.len() > inner.height as usize {
            let mut sb_state =
                ScrollbarState::new(self.coaches.len()).position(self.selected);
            Scrollbar::new(ScrollbarOrientation::VerticalRight).render(
                area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
