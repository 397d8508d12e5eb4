//! Assignment validation
//!
//! Checks a mapping against the roster it was meant to cover:
//! - Irreflexive: nobody gives to themselves
//! - Givers: exactly the roster, each once
//! - Receivers: exactly the roster, each once
//!
//! Pure diagnostic; never mutates the mapping.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::assignments::Assignments;
use crate::roster::Roster;

/// First invariant a mapping was found to break
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{participant} is assigned to themselves")]
    SelfAssignment { participant: String },

    #[error("giver set mismatch (missing: {missing:?}, unexpected: {unexpected:?})")]
    GiverMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error(
        "receiver set mismatch (missing: {missing:?}, duplicated: {duplicated:?}, unexpected: {unexpected:?})"
    )]
    ReceiverMismatch {
        missing: Vec<String>,
        duplicated: Vec<String>,
        unexpected: Vec<String>,
    },
}

/// Check all invariants, reporting the first violation found
///
/// Order of checks: self-assignment, givers, receivers.
pub fn validate(assignments: &Assignments, roster: &Roster) -> Result<(), Violation> {
    if let Some((giver, _)) = assignments.iter().find(|(g, r)| g == r) {
        return Err(Violation::SelfAssignment {
            participant: giver.to_string(),
        });
    }

    let expected: BTreeSet<&str> = roster.iter().collect();

    let givers: BTreeSet<&str> = assignments.givers().collect();
    if givers != expected {
        return Err(Violation::GiverMismatch {
            missing: owned(expected.difference(&givers)),
            unexpected: owned(givers.difference(&expected)),
        });
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for receiver in assignments.receivers() {
        *counts.entry(receiver).or_default() += 1;
    }
    let received: BTreeSet<&str> = counts.keys().copied().collect();
    let duplicated: Vec<String> = counts
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(r, _)| r.to_string())
        .collect();

    if received != expected || !duplicated.is_empty() {
        return Err(Violation::ReceiverMismatch {
            missing: owned(expected.difference(&received)),
            duplicated,
            unexpected: owned(received.difference(&expected)),
        });
    }

    Ok(())
}

/// Convenience wrapper around [`validate`]
pub fn is_valid(assignments: &Assignments, roster: &Roster) -> bool {
    validate(assignments, roster).is_ok()
}

fn owned<T: ToString>(names: impl Iterator<Item = T>) -> Vec<String> {
    names.map(|s| s.to_string()).collect()
}
