//! Command handlers for the presentation layer
//!
//! Each handler takes already-collected input (selected name, confirmation
//! answer) and returns a result; none of them touch the DOM.

use rand::Rng;

use crate::error::{Error, Result};
use crate::persistence::Storage;
use crate::store::AssignmentStore;

/// Outcome of an admin reset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset,
    Cancelled,
}

/// Look up the receiver for the selected giver
pub fn show_assignment<S: Storage, R: Rng + ?Sized>(
    store: &mut AssignmentStore<S>,
    selected: Option<&str>,
    rng: &mut R,
) -> Result<String> {
    let giver = selected.filter(|s| !s.is_empty()).ok_or(Error::NoSelection)?;
    let receiver = store.assignment_for(giver, rng)?;
    log::info!("Revealed assignment for {}", giver);
    Ok(receiver)
}

/// Clear the assignments, but only if the admin confirmed
pub fn reset_assignments<S: Storage>(
    store: &mut AssignmentStore<S>,
    confirmed: bool,
) -> Result<ResetOutcome> {
    if !confirmed {
        log::info!("Reset cancelled");
        return Ok(ResetOutcome::Cancelled);
    }
    store.reset()?;
    Ok(ResetOutcome::Reset)
}

/// What the startup check found in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStatus {
    /// Stored assignments were present and valid
    Loaded,
    /// Nothing was stored; fresh assignments were derived
    Created,
    /// Stored assignments were corrupt and have been replaced
    Replaced,
}

/// Validate whatever is stored, then make sure a usable mapping exists
pub fn startup_check<S: Storage, R: Rng + ?Sized>(
    store: &mut AssignmentStore<S>,
    rng: &mut R,
) -> Result<StartupStatus> {
    let status = match store.load() {
        Ok(Some(assignments)) => {
            log::info!("Assignments are valid ({} participants)", assignments.len());
            return Ok(StartupStatus::Loaded);
        }
        Ok(None) => StartupStatus::Created,
        Err(Error::CorruptPersistedState(reason)) => {
            log::error!("Stored assignments failed validation: {}", reason);
            StartupStatus::Replaced
        }
        Err(e) => return Err(e),
    };

    store.get_assignments(rng)?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ASSIGNMENTS_KEY;
    use crate::persistence::MemoryStorage;
    use crate::roster::Roster;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn store() -> AssignmentStore<MemoryStorage> {
        AssignmentStore::new(Roster::default(), MemoryStorage::new())
    }

    #[test]
    fn test_show_requires_selection() {
        let mut store = store();
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(matches!(
            show_assignment(&mut store, None, &mut rng),
            Err(Error::NoSelection)
        ));
        assert!(matches!(
            show_assignment(&mut store, Some(""), &mut rng),
            Err(Error::NoSelection)
        ));
        // Nothing was derived for an empty selection
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_show_known_and_unknown() {
        let mut store = store();
        let mut rng = Pcg32::seed_from_u64(2);

        let receiver = show_assignment(&mut store, Some("Emma Thompson"), &mut rng).unwrap();
        assert_ne!(receiver, "Emma Thompson");
        assert!(store.roster().contains(&receiver));

        assert!(matches!(
            show_assignment(&mut store, Some("Santa"), &mut rng),
            Err(Error::UnknownParticipant(_))
        ));
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut store = store();
        let mut rng = Pcg32::seed_from_u64(3);
        let before = store.get_assignments(&mut rng).unwrap();

        assert_eq!(
            reset_assignments(&mut store, false).unwrap(),
            ResetOutcome::Cancelled
        );
        assert_eq!(store.peek().unwrap(), Some(before));

        assert_eq!(
            reset_assignments(&mut store, true).unwrap(),
            ResetOutcome::Reset
        );
        assert_eq!(store.peek().unwrap(), None);
    }

    #[test]
    fn test_startup_check_creates_then_loads() {
        let mut store = store();
        let mut rng = Pcg32::seed_from_u64(4);

        assert_eq!(
            startup_check(&mut store, &mut rng).unwrap(),
            StartupStatus::Created
        );
        let created = store.peek().unwrap();
        assert!(created.is_some());

        assert_eq!(
            startup_check(&mut store, &mut rng).unwrap(),
            StartupStatus::Loaded
        );
        assert_eq!(store.peek().unwrap(), created);
    }

    #[test]
    fn test_startup_check_reports_corrupt_slot() {
        let mut storage = MemoryStorage::new();
        storage
            .set(ASSIGNMENTS_KEY, r#"{"A":"A","B":"C","C":"B"}"#)
            .unwrap();
        let mut store = AssignmentStore::new(Roster::new(["A", "B", "C"]).unwrap(), storage);
        let mut rng = Pcg32::seed_from_u64(5);

        assert_eq!(
            startup_check(&mut store, &mut rng).unwrap(),
            StartupStatus::Replaced
        );
        assert!(store.load().unwrap().is_some());
    }
}
