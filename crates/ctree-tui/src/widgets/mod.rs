//! Ratatui widgets for the ctree TUI.

pub mod help;
pub mod query_bar;
pub mod results_list;
pub mod status_bar;
