//! Test fixtures — coach records for harness assertions.
//!
//! These helpers favour readability in assertions over flexibility; ids are
//! short and names are real-looking so failure output reads naturally.

use ctree_core::Coach;

pub fn coach(id: &str, name: &str) -> Coach {
    Coach::new(id, name)
}

/// A small roster with overlapping name substrings, handy for exercising
/// the service's filter: "smith" matches two entries, "walsh" one.
pub fn sample_roster() -> Vec<(String, String)> {
    [
        ("BillWalsh", "Bill Walsh"),
        ("DonSmith", "Don Smith"),
        ("EmmittSmith", "Emmitt Smith"),
        ("MikeHolmgren", "Mike Holmgren"),
        ("AndyReid", "Andy Reid"),
    ]
    .iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}
