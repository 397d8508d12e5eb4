//! Participant roster
//!
//! The fixed, ordered set of people taking part. Order matters: it is the
//! order givers are assigned in during derivation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_PARTICIPANTS;

/// Smallest roster for which a derangement exists
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRoster {
    #[error("need at least {MIN_PARTICIPANTS} participants, got {0}")]
    TooFew(usize),
    #[error("participant names must not be empty")]
    EmptyName,
    #[error("duplicate participant: {0}")]
    Duplicate(String),
}

/// Validated participant list (unique, non-empty names, N >= 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster, rejecting empty names, duplicates and sets too small to derange
    pub fn new<I, S>(names: I) -> Result<Self, InvalidRoster>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() {
                return Err(InvalidRoster::EmptyName);
            }
            if !seen.insert(name.as_str()) {
                return Err(InvalidRoster::Duplicate(name.clone()));
            }
        }

        if names.len() < MIN_PARTICIPANTS {
            return Err(InvalidRoster::TooFew(names.len()));
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            names: DEFAULT_PARTICIPANTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Roster::new(names).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_is_valid() {
        let roster = Roster::default();
        assert_eq!(roster.len(), 15);
        assert!(Roster::new(roster.names().to_vec()).is_ok());
        assert!(roster.contains("Maya Gupta"));
    }

    #[test]
    fn test_rejects_small_rosters() {
        assert_eq!(Roster::new(Vec::<String>::new()), Err(InvalidRoster::TooFew(0)));
        assert_eq!(Roster::new(["A"]), Err(InvalidRoster::TooFew(1)));
        assert!(Roster::new(["A", "B"]).is_ok());
    }

    #[test]
    fn test_rejects_duplicates_and_empty_names() {
        assert_eq!(
            Roster::new(["A", "B", "A"]),
            Err(InvalidRoster::Duplicate("A".to_string()))
        );
        assert_eq!(Roster::new(["A", ""]), Err(InvalidRoster::EmptyName));
    }

    #[test]
    fn test_preserves_order() {
        let roster = Roster::new(["C", "A", "B"]).unwrap();
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_deserialize_validates() {
        let roster: Roster = serde_json::from_str(r#"["A","B","C"]"#).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(serde_json::from_str::<Roster>(r#"["A"]"#).is_err());
        assert!(serde_json::from_str::<Roster>(r#"["A","A"]"#).is_err());
    }
}
