//! Persisted assignments
//!
//! One mapping per storage slot, derived lazily on first read and reused
//! until `reset`. A slot that fails to parse or validate is treated as empty
//! and replaced.
//!
//! Handles sharing a slot (e.g. several browser tabs) race on first write:
//! whichever persists last wins.

use rand::Rng;

use crate::assignments::Assignments;
use crate::consts::ASSIGNMENTS_KEY;
use crate::derive::Deriver;
use crate::error::{Error, Result};
use crate::persistence::{Storage, StorageError};
use crate::roster::Roster;
use crate::validate::validate;

pub struct AssignmentStore<S: Storage> {
    roster: Roster,
    storage: S,
    key: String,
    deriver: Deriver,
}

impl<S: Storage> AssignmentStore<S> {
    /// Store over `storage` using the default slot key
    pub fn new(roster: Roster, storage: S) -> Self {
        Self {
            roster,
            storage,
            key: ASSIGNMENTS_KEY.to_string(),
            deriver: Deriver::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_deriver(mut self, deriver: Deriver) -> Self {
        self.deriver = deriver;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Persisted assignments, or `CorruptPersistedState` if the slot holds
    /// something that does not parse or validate. Never derives.
    pub fn load(&self) -> Result<Option<Assignments>> {
        let Some(json) = self.storage.get(&self.key)? else {
            return Ok(None);
        };

        let assignments = serde_json::from_str::<Assignments>(&json)
            .map_err(|e| Error::CorruptPersistedState(e.to_string()))?;
        validate(&assignments, &self.roster)
            .map_err(|v| Error::CorruptPersistedState(v.to_string()))?;

        Ok(Some(assignments))
    }

    /// Like `load`, but a corrupt slot reads as empty
    pub fn peek(&self) -> Result<Option<Assignments>> {
        match self.load() {
            Err(Error::CorruptPersistedState(reason)) => {
                log::warn!("Discarding persisted assignments: {}", reason);
                Ok(None)
            }
            other => other,
        }
    }

    /// Load the persisted assignments, deriving and persisting fresh ones if needed
    pub fn get_assignments<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Assignments> {
        if let Some(assignments) = self.peek()? {
            return Ok(assignments);
        }

        let assignments = self.deriver.derive(&self.roster, rng)?;
        let json = serde_json::to_string(&assignments).map_err(StorageError::from)?;
        self.storage.set(&self.key, &json)?;
        log::info!(
            "Generated new assignments for {} participants",
            assignments.len()
        );
        Ok(assignments)
    }

    /// Receiver assigned to `giver`
    pub fn assignment_for<R: Rng + ?Sized>(&mut self, giver: &str, rng: &mut R) -> Result<String> {
        let assignments = self.get_assignments(rng)?;
        assignments
            .get(giver)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownParticipant(giver.to_string()))
    }

    /// Drop the persisted assignments; the next read derives new ones
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(&self.key)?;
        log::info!("Assignments reset");
        Ok(())
    }
}
