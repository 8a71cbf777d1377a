//! Search controller — debounced, race-safe incremental coach search.
//!
//! The controller owns the query string and cursor, the debounce timer, the
//! current result set, and the list selection. It never performs I/O: the
//! app shell polls [`SearchController::take_due_search`] on its tick, runs
//! the returned [`SearchTicket`] against the API client on a background
//! task, and hands the resolved [`SearchOutcome`] back through
//! [`SearchController::apply`].
//!
//! # Ordering
//!
//! Query edits are synchronous — the rendered text always equals the latest
//! input. Result and error updates are asynchronous and sequence-tagged:
//! each ticket carries a monotonically increasing `seq`, and `apply` only
//! accepts the outcome whose `seq` matches the latest issued ticket. A
//! response that arrives after a newer search was issued is discarded, so
//! out-of-order arrivals can never overwrite fresher results.
//!
//! # Debounce
//!
//! [`Debouncer`] is a plain deadline: every edit re-arms it to
//! `now + quiet period`, and the app tick asks whether it is due. A burst
//! of keystrokes therefore collapses into one ticket, issued with the final
//! query once input has been quiet for the full period. Dropping the
//! controller (or calling [`SearchController::cancel_pending`]) before the
//! deadline means no ticket is ever produced.

use std::time::{Duration, Instant};

use crate::types::{Coach, SearchOutcome, SEARCH_FAILED_MSG};

/// Quiet period between the last keystroke and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Cancellable deadline timer owned by the controller.
///
/// `schedule` re-arms the deadline on every call; `fire_due` reports (and
/// disarms) an elapsed deadline exactly once. Callers supply `now` so tests
/// can drive time explicitly.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self { wait, deadline: None }
    }

    /// Arm (or re-arm) the timer to fire one quiet period from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Disarm the timer. A cancelled deadline never fires.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per elapsed deadline; disarms on fire.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchController
// ---------------------------------------------------------------------------

/// One scheduled fetch: the sequence tag and the query it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

pub struct SearchController {
    query: String,
    /// Byte offset of the text cursor within `query`.
    cursor: usize,
    debouncer: Debouncer,
    /// Sequence tag of the most recently issued ticket (0 = none yet).
    latest_seq: u64,
    results: Vec<Coach>,
    error: Option<String>,
    /// Index of the highlighted row in `results`.
    selected: usize,
}

impl SearchController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            debouncer: Debouncer::new(debounce),
            latest_seq: 0,
            results: Vec::new(),
            error: None,
            selected: 0,
        }
    }

    // ── Query editing (synchronous) ────────────────────────────────────────

    /// Insert a character at the cursor and re-arm the debounce timer.
    pub fn insert_char(&mut self, c: char, now: Instant) {
        self.query.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.debouncer.schedule(now);
        tracing::debug!(query = %self.query, cursor = self.cursor, "search: char inserted");
    }

    /// Delete the character before the cursor and re-arm the debounce timer.
    ///
    /// Backspace on an empty query is a no-op and does not schedule a fetch.
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor == 0 {
            return;
        }
        // Walk back one char boundary
        let prev = self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.query.remove(prev);
        self.cursor = prev;
        self.debouncer.schedule(now);
        tracing::debug!(query = %self.query, cursor = self.cursor, "search: backspace");
    }

    /// Move the text cursor left one character. Does not touch the timer.
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.query[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    /// Move the text cursor right one character. Does not touch the timer.
    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.len() {
            self.cursor = self.query[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.query.len());
        }
    }

    // ── Fetch scheduling ───────────────────────────────────────────────────

    /// If the quiet period has elapsed, issue exactly one [`SearchTicket`]
    /// for the current query and disarm the timer.
    pub fn take_due_search(&mut self, now: Instant) -> Option<SearchTicket> {
        if !self.debouncer.fire_due(now) {
            return None;
        }
        self.latest_seq += 1;
        let ticket = SearchTicket {
            seq: self.latest_seq,
            query: self.query.clone(),
        };
        tracing::debug!(seq = ticket.seq, query = %ticket.query, "search: ticket issued");
        Some(ticket)
    }

    /// Disarm any pending debounce. Used on teardown so a scheduled fetch
    /// never fires after the screen is gone.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    pub fn fetch_scheduled(&self) -> bool {
        self.debouncer.is_armed()
    }

    // ── Applying resolved fetches ──────────────────────────────────────────

    /// Apply a resolved fetch outcome. Returns `true` if the state changed.
    ///
    /// Only the outcome tagged with the latest issued `seq` is accepted;
    /// anything older is a stale response and is discarded silently. On
    /// success the result set is replaced and the error cleared; on failure
    /// the fixed error message is set and the previous results are kept.
    pub fn apply(&mut self, seq: u64, outcome: SearchOutcome) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "search: stale response discarded");
            return false;
        }
        match outcome {
            SearchOutcome::Matches(coaches) => {
                tracing::debug!(seq, count = coaches.len(), "search: results applied");
                self.results = coaches;
                self.error = None;
                self.selected = 0;
            }
            SearchOutcome::Failed => {
                tracing::debug!(seq, "search: attempt failed");
                self.error = Some(SEARCH_FAILED_MSG.to_string());
            }
        }
        true
    }

    // ── List selection ─────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The coach under the list cursor, if the result set is non-empty.
    pub fn selected_coach(&self) -> Option<&Coach> {
        self.results.get(self.selected)
    }

    // ── Accessors for the renderer ─────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn results(&self) -> &[Coach] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
