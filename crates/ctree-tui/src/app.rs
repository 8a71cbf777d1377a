//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! # Search wiring
//!
//! The loop ticks every 16ms. Each tick it
//!
//! 1. drains resolved fetch outcomes from the response channel and hands
//!    them to the controller (which discards anything stale by sequence),
//! 2. asks the controller whether the debounce quiet period has elapsed
//!    and, if so, spawns the fetch for the issued ticket on a background
//!    tokio task,
//! 3. polls crossterm for key input and dispatches by focus.
//!
//! Query edits therefore render on the very next frame, while results
//! arrive whenever their task resolves. On exit the response receiver is
//! dropped, so an in-flight fetch finishing late sends into the void and
//! mutates nothing.

use crate::{
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        help::HelpPopup, query_bar::QueryBar, results_list::ResultsList, status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ctree_api::SearchClient;
use ctree_core::{
    config::Config,
    controller::{SearchController, SearchTicket},
    Coach, SearchOutcome,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The query bar is active; keys edit the search text (insert mode).
    Query,
    /// The results list is active; keys navigate and select.
    Results,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: SearchController,
    pub focus: Focus,
    /// Most recently selected coach, echoed in the status bar.
    pub selected: Option<Coach>,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A fetch outcome travelling back from a background task, tagged with the
/// sequence of the ticket that issued it.
struct FetchDone {
    seq: u64,
    outcome: SearchOutcome,
}

pub struct App {
    state: AppState,
    client: SearchClient,
    outcome_tx: mpsc::UnboundedSender<FetchDone>,
    outcome_rx: mpsc::UnboundedReceiver<FetchDone>,
}

impl App {
    pub fn new(config: Config, theme: Theme, client: SearchClient) -> Self {
        let controller =
            SearchController::new(Duration::from_millis(config.search.debounce_ms));
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let state = AppState {
            controller,
            focus: Focus::Query,
            selected: None,
            theme,
            config,
            show_help: false,
            quit: false,
        };

        App { state, client, outcome_tx, outcome_rx }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit. Must run on a multi-thread tokio runtime: the loop blocks on
    /// crossterm polling while fetches resolve on worker threads.
    pub async fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                self.state.controller.cancel_pending();
                break;
            }

            // Resolved fetches first, oldest first; the controller discards
            // anything superseded by a newer ticket.
            while let Ok(done) = self.outcome_rx.try_recv() {
                self.state.controller.apply(done.seq, done.outcome);
            }

            // Fire the debounced search once its quiet period has elapsed.
            if let Some(ticket) = self.state.controller.take_due_search(Instant::now()) {
                self.spawn_fetch(ticket);
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping while typing in the query bar
                        let app_event = if self.state.focus == Focus::Query
                            && !self.state.show_help
                        {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Run one issued ticket against the search service on a background
    /// task. The outcome comes back through the channel; if the UI has
    /// exited by then, the send fails and the response is dropped.
    fn spawn_fetch(&self, ticket: SearchTicket) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        let limit = self.state.config.api.limit;
        tokio::spawn(async move {
            let outcome = match client.search(&ticket.query, limit).await {
                Ok(coaches) => SearchOutcome::Matches(coaches),
                Err(err) => {
                    tracing::debug!(seq = ticket.seq, error = %err, "search fetch failed");
                    SearchOutcome::Failed
                }
            };
            let _ = tx.send(FetchDone { seq: ticket.seq, outcome });
        });
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;
        let now = Instant::now();

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Terminal resize is handled automatically by ratatui
        if let AppEvent::Resize(_, _) = event {
            return;
        }

        match s.focus {
            Focus::Query => match event {
                // Only Ctrl+c maps to Quit in insert mode
                AppEvent::Quit => {
                    tracing::debug!("quit");
                    s.quit = true;
                }
                AppEvent::Char(c) => s.controller.insert_char(c, now),
                AppEvent::Backspace => s.controller.backspace(now),
                AppEvent::Nav(Direction::Left) => s.controller.cursor_left(),
                AppEvent::Nav(Direction::Right) => s.controller.cursor_right(),
                // Down-arrow, Tab, and Enter all drop into the results list
                AppEvent::Nav(Direction::Down) | AppEvent::FocusNext | AppEvent::Enter => {
                    if !s.controller.results().is_empty() {
                        tracing::debug!("focus: Query -> Results");
                        s.focus = Focus::Results;
                    }
                }
                _ => {}
            },
            Focus::Results => match event {
                AppEvent::Quit => {
                    tracing::debug!("quit");
                    s.quit = true;
                }
                AppEvent::Char('?') => {
                    tracing::debug!("help popup opened");
                    s.show_help = true;
                }
                AppEvent::Nav(Direction::Up) => s.controller.select_prev(),
                AppEvent::Nav(Direction::Down) => s.controller.select_next(),
                AppEvent::Enter => {
                    let picked = s.controller.selected_coach().cloned();
                    if let Some(coach) = picked {
                        tracing::info!(coach = %coach.id, name = %coach.name, "selected");
                        s.selected = Some(coach);
                    }
                }
                AppEvent::QueryFocus | AppEvent::Escape | AppEvent::FocusNext => {
                    tracing::debug!("focus: Results -> Query");
                    s.focus = Focus::Query;
                }
                _ => {}
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | results | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let query_focused = state.focus == Focus::Query;

    frame.render_widget(
        QueryBar::new(
            state.controller.query(),
            state.controller.cursor(),
            query_focused,
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        ResultsList::new(
            state.controller.results(),
            state.controller.selected_index(),
            state.focus == Focus::Results,
            state.config.ui.show_ids,
            &state.theme,
        ),
        vert[1],
    );
    frame.render_widget(
        StatusBar::new(state.controller.error(), state.selected.as_ref(), &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
        return; // popup owns the screen; no text cursor
    }

    // Position the terminal cursor when the query bar is focused
    if query_focused {
        let qb = QueryBar::new(
            state.controller.query(),
            state.controller.cursor(),
            true,
            &state.theme,
        );
        let (cx, cy) = qb.cursor_position(vert[0]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
