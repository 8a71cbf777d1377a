//! ctree-core — Coaching Tree core library.
//!
//! This crate holds everything the UI shell projects onto the screen: the
//! [`Coach`] record returned by the search service, the application
//! configuration, and the [`controller::SearchController`] state machine
//! that owns the query string, the debounce timer, and the sequence-tagged
//! result set.
//!
//! # Architecture
//!
//! ```text
//! keystrokes ──► SearchController ──► SearchTicket ──► (api crate fetch)
//!                      ▲                                      │
//!                      └────────── apply(seq, outcome) ◄──────┘
//! ```
//!
//! The controller is deliberately free of I/O and clocks: callers pass
//! `Instant` values in, and fetches happen outside this crate. That keeps
//! every debounce and race-ordering property testable without a runtime.

pub mod config;
pub mod controller;
pub mod types;

pub use types::{Coach, SearchOutcome, SEARCH_FAILED_MSG};
