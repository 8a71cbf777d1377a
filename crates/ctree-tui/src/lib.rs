//! ctree TUI — ratatui application shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the TUI against the search service named in `config`.
pub async fn run(config: ctree_core::config::Config) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    let client = ctree_api::SearchClient::new(config.api.base_url.clone());
    App::new(config, theme, client).run().await
}
