//! Colour theme for the ctree TUI.
//!
//! One built-in theme, constructed in code. Call [`Theme::load_default`] at
//! startup and pass the result through the application as a shared
//! reference.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,
    /// Highlighted row in the results list.
    pub selection: Style,
    /// Error message in the status line.
    pub error: Style,
    /// Placeholder text and keybinding hints.
    pub hint: Style,
    /// Coach ids when `[ui] show_ids` is enabled.
    pub id: Style,
}

impl Theme {
    pub fn load_default() -> Self {
        Self {
            border_focused: Style::default().fg(Color::Cyan),
            border_unfocused: Style::default().fg(Color::DarkGray),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            hint: Style::default().add_modifier(Modifier::DIM),
            id: Style::default().fg(Color::DarkGray),
        }
    }
}
