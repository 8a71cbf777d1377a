//! Shared test utilities for ctree integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fake coach API is deterministic: it reproduces the
//! real service's filter semantics (case-insensitive name substring, ordered
//! by name ascending, truncated to `limit`).

pub mod builders;
pub mod fake_coach_api;

pub use builders::*;
pub use fake_coach_api::FakeCoachApi;
