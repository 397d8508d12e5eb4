//! Giver → receiver mapping

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete set of gift assignments, keyed by giver
///
/// Serializes as a flat JSON object (`{"giver": "receiver", ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments {
    pairs: BTreeMap<String, String>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `giver` gives to `receiver`, replacing any earlier pairing
    pub fn insert(&mut self, giver: impl Into<String>, receiver: impl Into<String>) {
        self.pairs.insert(giver.into(), receiver.into());
    }

    /// Receiver for the given giver
    pub fn get(&self, giver: &str) -> Option<&str> {
        self.pairs.get(giver).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn givers(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    pub fn receivers(&self) -> impl Iterator<Item = &str> {
        self.pairs.values().map(String::as_str)
    }

    /// (giver, receiver) pairs in giver order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(g, r)| (g.as_str(), r.as_str()))
    }
}

impl<G: Into<String>, R: Into<String>> FromIterator<(G, R)> for Assignments {
    fn from_iter<T: IntoIterator<Item = (G, R)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(g, r)| (g.into(), r.into()))
                .collect(),
        }
    }
}
