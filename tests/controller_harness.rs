//! Search controller integration harness.
//!
//! # What this covers
//!
//! The observable contract of the debounced search controller, driven with
//! explicit `Instant`s so every timing property is deterministic:
//!
//! - **Debounce collapsing**: any burst of edits inside the quiet period
//!   issues exactly one fetch ticket, carrying the final query.
//! - **Immediate echo**: the query text always equals the latest input,
//!   no matter what fetches are pending or resolving.
//! - **Stale-response discard**: a response arriving after a newer ticket
//!   was issued never overwrites fresher results.
//! - **Error stability**: failure sets exactly the fixed user message and
//!   keeps the previous results; the next applied success clears it.
//! - **Teardown safety**: cancelling the pending debounce means no ticket
//!   is ever produced, and applying a superseded outcome is a no-op.
//!
//! # What this does NOT cover
//!
//! - HTTP behaviour of the client (see client_harness)
//! - The full controller + client + service path (see search_flow_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test controller_harness
//! ```

mod common;
use common::*;

use ctree_core::controller::SearchController;
use ctree_core::{SearchOutcome, SEARCH_FAILED_MSG};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(500);

fn controller() -> SearchController {
    SearchController::new(QUIET)
}

fn type_str(c: &mut SearchController, text: &str, at: Instant) {
    for ch in text.chars() {
        c.insert_char(ch, at);
    }
}

// ---------------------------------------------------------------------------
// Debounce collapsing
// ---------------------------------------------------------------------------

/// A burst of keystrokes inside the quiet period issues exactly one ticket,
/// and that ticket carries the final query.
#[test]
fn burst_collapses_to_one_fetch_with_final_query() {
    let t0 = Instant::now();
    let mut c = controller();

    for (i, ch) in "holmgren".chars().enumerate() {
        // 80ms apart — always inside the 500ms quiet period
        c.insert_char(ch, t0 + Duration::from_millis(80 * i as u64));
    }
    let last_edit = t0 + Duration::from_millis(80 * 7);

    // Nothing fires while the quiet period is still running
    assert_eq!(c.take_due_search(last_edit + QUIET - Duration::from_millis(1)), None);

    let ticket = c.take_due_search(last_edit + QUIET).unwrap();
    assert_eq!(ticket.query, "holmgren");

    // And nothing more fires until the next edit
    assert_eq!(c.take_due_search(last_edit + Duration::from_secs(60)), None);
}

/// Keystrokes spaced wider than the quiet period each get their own fetch.
#[test]
fn spaced_keystrokes_issue_separate_fetches() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('a', t0);
    let first = c.take_due_search(t0 + QUIET).unwrap();
    assert_eq!(first.query, "a");

    let t1 = t0 + Duration::from_secs(2);
    c.insert_char('b', t1);
    let second = c.take_due_search(t1 + QUIET).unwrap();
    assert_eq!(second.query, "ab");
    assert!(second.seq > first.seq);
}

/// Backspace is an edit like any other: it re-arms the quiet period.
#[test]
fn backspace_rearms_the_debounce() {
    let t0 = Instant::now();
    let mut c = controller();

    type_str(&mut c, "ab", t0);
    c.backspace(t0 + Duration::from_millis(400));

    assert_eq!(c.take_due_search(t0 + QUIET), None);
    let ticket = c
        .take_due_search(t0 + Duration::from_millis(400) + QUIET)
        .unwrap();
    assert_eq!(ticket.query, "a");
}

// ---------------------------------------------------------------------------
// Immediate echo
// ---------------------------------------------------------------------------

/// The rendered query equals the latest input even while a fetch for an
/// older query is still unresolved.
#[test]
fn query_echo_is_synchronous() {
    let t0 = Instant::now();
    let mut c = controller();

    type_str(&mut c, "sm", t0);
    let pending = c.take_due_search(t0 + QUIET).unwrap();

    // User keeps typing while the fetch is in flight
    type_str(&mut c, "ith", t0 + QUIET + Duration::from_millis(10));
    assert_eq!(c.query(), "smith");

    // The in-flight response resolving changes results, never the query text
    c.apply(pending.seq, SearchOutcome::Matches(vec![coach("c9", "Slow Response")]));
    assert_eq!(c.query(), "smith");
}

// ---------------------------------------------------------------------------
// Stale-response discard
// ---------------------------------------------------------------------------

/// Query A issued, then query B; A's response arrives after B's. The result
/// set must reflect B.
#[test]
fn out_of_order_responses_keep_latest_query_results() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('a', t0);
    let a = c.take_due_search(t0 + QUIET).unwrap();

    let t1 = t0 + QUIET + Duration::from_millis(100);
    c.insert_char('b', t1);
    let b = c.take_due_search(t1 + QUIET).unwrap();

    assert!(c.apply(b.seq, SearchOutcome::Matches(vec![coach("b1", "Fresh")])));
    assert!(!c.apply(a.seq, SearchOutcome::Matches(vec![coach("a1", "Stale")])));

    assert_eq!(c.results(), &[coach("b1", "Fresh")]);
}

/// A stale *failure* is discarded too: it must not set the error message
/// over fresher results.
#[test]
fn stale_failure_does_not_set_error() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('a', t0);
    let a = c.take_due_search(t0 + QUIET).unwrap();

    let t1 = t0 + QUIET + Duration::from_millis(100);
    c.insert_char('b', t1);
    let b = c.take_due_search(t1 + QUIET).unwrap();

    c.apply(b.seq, SearchOutcome::Matches(vec![coach("b1", "Fresh")]));
    c.apply(a.seq, SearchOutcome::Failed);

    assert_eq!(c.error(), None);
    assert_eq!(c.results(), &[coach("b1", "Fresh")]);
}

/// Responses arriving in issue order apply normally.
#[test]
fn in_order_responses_apply() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('a', t0);
    let a = c.take_due_search(t0 + QUIET).unwrap();
    assert!(c.apply(a.seq, SearchOutcome::Matches(vec![coach("a1", "First")])));

    let t1 = t0 + QUIET + Duration::from_millis(100);
    c.insert_char('b', t1);
    let b = c.take_due_search(t1 + QUIET).unwrap();
    assert!(c.apply(b.seq, SearchOutcome::Matches(vec![coach("b1", "Second")])));

    assert_eq!(c.results(), &[coach("b1", "Second")]);
}

// ---------------------------------------------------------------------------
// Error stability
// ---------------------------------------------------------------------------

/// The error message is exactly the fixed string, results survive the
/// failure, and the next applied success clears the error.
#[test]
fn failure_message_is_stable_and_cleared_by_success() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('s', t0);
    let first = c.take_due_search(t0 + QUIET).unwrap();
    c.apply(first.seq, SearchOutcome::Matches(vec![coach("c1", "Don Smith")]));

    let t1 = t0 + Duration::from_secs(2);
    c.insert_char('m', t1);
    let failed = c.take_due_search(t1 + QUIET).unwrap();
    c.apply(failed.seq, SearchOutcome::Failed);

    assert_eq!(c.error(), Some("Failed to get coaches, please try again"));
    assert_eq!(c.error(), Some(SEARCH_FAILED_MSG));
    assert_eq!(c.results(), &[coach("c1", "Don Smith")]);

    // User retries by typing; the next success clears the error
    let t2 = t1 + Duration::from_secs(2);
    c.insert_char('i', t2);
    let retry = c.take_due_search(t2 + QUIET).unwrap();
    c.apply(retry.seq, SearchOutcome::Matches(vec![coach("c1", "Don Smith")]));
    assert_eq!(c.error(), None);
}

// ---------------------------------------------------------------------------
// Teardown safety
// ---------------------------------------------------------------------------

/// Cancelling the pending debounce before it fires means no fetch is ever
/// scheduled.
#[test]
fn cancel_before_fire_issues_no_ticket() {
    let t0 = Instant::now();
    let mut c = controller();

    type_str(&mut c, "smith", t0);
    assert!(c.fetch_scheduled());
    c.cancel_pending();
    assert!(!c.fetch_scheduled());
    assert_eq!(c.take_due_search(t0 + Duration::from_secs(3600)), None);
}

/// An outcome whose ticket has been superseded mutates nothing — the state
/// a destroyed or re-queried controller renders is untouched.
#[test]
fn superseded_outcome_is_a_noop() {
    let t0 = Instant::now();
    let mut c = controller();

    c.insert_char('a', t0);
    let old = c.take_due_search(t0 + QUIET).unwrap();

    let t1 = t0 + Duration::from_secs(2);
    c.insert_char('b', t1);
    let fresh = c.take_due_search(t1 + QUIET).unwrap();
    c.apply(fresh.seq, SearchOutcome::Matches(vec![coach("b1", "Fresh")]));

    let before_results = c.results().to_vec();
    let before_error = c.error().map(str::to_string);

    assert!(!c.apply(old.seq, SearchOutcome::Matches(vec![coach("x", "Ghost")])));
    assert!(!c.apply(old.seq, SearchOutcome::Failed));

    assert_eq!(c.results(), before_results.as_slice());
    assert_eq!(c.error(), before_error.as_deref());
}
