//! Assignment derivation
//!
//! Generate, validate, retry:
//! 1. Shuffle a copy of the roster to use as the receiver pool
//! 2. Walk givers in roster order, each taking the first pooled receiver
//!    that is not themselves
//! 3. If a giver is left with only themselves, throw the attempt away and
//!    start again from step 1
//!
//! Step 3 can only trigger on the last giver. The restart is from scratch;
//! backtracking from the failing giver would change the output distribution.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::assignments::Assignments;
use crate::error::{Error, Result};
use crate::roster::Roster;
use crate::validate::validate;

/// Produces fresh assignments; holds no state between calls beyond its config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deriver {
    /// Give up after this many attempts (`None` retries until success)
    pub max_attempts: Option<u32>,
}

impl Deriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// Derive a derangement of `roster`
    pub fn derive<R: Rng + ?Sized>(&self, roster: &Roster, rng: &mut R) -> Result<Assignments> {
        let mut attempts = 0u32;
        loop {
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    log::warn!("Derivation exhausted after {} attempts", attempts);
                    return Err(Error::DerivationExhausted { attempts });
                }
            }
            attempts += 1;

            let Some(assignments) = attempt(roster, rng) else {
                log::trace!("Attempt {} left a giver with only themselves", attempts);
                continue;
            };

            if let Err(violation) = validate(&assignments, roster) {
                // Unreachable for a well-formed roster; treat like a dead end
                log::error!("Derived assignments failed validation: {}", violation);
                continue;
            }

            log::debug!(
                "Derived assignments for {} participants in {} attempt(s)",
                roster.len(),
                attempts
            );
            return Ok(assignments);
        }
    }
}

/// Derive with no attempt cap
pub fn derive_assignments<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Assignments {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if let Some(assignments) = attempt(roster, rng) {
            debug_assert_eq!(validate(&assignments, roster), Ok(()));
            log::debug!("Derived assignments in {} attempt(s)", attempts);
            return assignments;
        }
    }
}

/// One pass of shuffle-then-assign; `None` if the last giver is stuck with themselves
fn attempt<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Option<Assignments> {
    let mut receivers: Vec<&str> = roster.iter().collect();
    // Fisher-Yates
    receivers.shuffle(rng);

    let mut assignments = Assignments::new();
    for giver in roster.iter() {
        let idx = receivers.iter().position(|r| *r != giver)?;
        // `remove` (not `swap_remove`) keeps the pool's relative order
        let receiver = receivers.remove(idx);
        assignments.insert(giver, receiver);
    }

    Some(assignments)
}
