//! Core types for ctree-core — Coaching Tree.
//!
//! This module defines the data shared across the controller, the API
//! client, and the UI: the [`Coach`] record and the [`SearchOutcome`] of a
//! resolved fetch.

use serde::Deserialize;

/// The one user-facing message for any failed search attempt.
///
/// Network failure, a non-2xx status, and a malformed body all collapse to
/// this string; the underlying detail is logged, never shown.
pub const SEARCH_FAILED_MSG: &str = "Failed to get coaches, please try again";

/// A single coach record returned by the search service.
///
/// The wire format names the id field `coach`, e.g.
/// `{"coach": "BillWalsh", "name": "Bill Walsh"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Coach {
    /// Stable identifier, used for selection.
    #[serde(rename = "coach")]
    pub id: String,
    /// Human-readable display name.
    pub name: String,
}

impl Coach {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Result of one resolved search fetch, as handed back to the controller.
///
/// `Failed` carries no detail on purpose: by the time an outcome reaches
/// the controller the error has already been collapsed to
/// [`SEARCH_FAILED_MSG`] and logged at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(Vec<Coach>),
    Failed,
}
