//! Exchange settings
//!
//! Persisted separately from the assignments, under their own key.

use serde::{Deserialize, Serialize};

use crate::consts::{ASSIGNMENTS_KEY, SETTINGS_KEY};
use crate::derive::Deriver;
use crate::persistence::{Storage, StorageError};
use crate::roster::Roster;
use crate::store::AssignmentStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Participants, in dropdown order
    pub participants: Roster,
    /// Storage key holding the assignments
    pub assignments_key: String,
    /// Derivation attempt cap (`None` = unlimited)
    pub max_attempts: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            participants: Roster::default(),
            assignments_key: ASSIGNMENTS_KEY.to_string(),
            max_attempts: None,
        }
    }
}

impl Settings {
    pub fn deriver(&self) -> Deriver {
        Deriver {
            max_attempts: self.max_attempts,
        }
    }

    /// Build an assignment store over `storage` configured from these settings
    pub fn store<S: Storage>(&self, storage: S) -> AssignmentStore<S> {
        AssignmentStore::new(self.participants.clone(), storage)
            .with_key(self.assignments_key.clone())
            .with_deriver(self.deriver())
    }

    /// Load settings from storage, falling back to defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    if settings.max_attempts == Some(0) {
                        log::warn!("Ignoring max_attempts of 0, derivation is uncapped");
                        settings.max_attempts = None;
                    }
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use rand::SeedableRng;

    #[test]
    fn test_load_defaults_when_absent() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            participants: Roster::new(["A", "B", "C"]).unwrap(),
            assignments_key: "office_2026".to_string(),
            max_attempts: Some(100),
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(SETTINGS_KEY, r#"{"participants":["A","B"]}"#)
            .unwrap();

        let settings = Settings::load(&storage);
        assert_eq!(settings.participants.len(), 2);
        assert_eq!(settings.assignments_key, ASSIGNMENTS_KEY);
        assert_eq!(settings.max_attempts, None);
    }

    #[test]
    fn test_invalid_roster_falls_back() {
        let mut storage = MemoryStorage::new();
        storage
            .set(SETTINGS_KEY, r#"{"participants":["A","A"]}"#)
            .unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_zero_attempt_cap_is_dropped() {
        let mut storage = MemoryStorage::new();
        storage
            .set(SETTINGS_KEY, r#"{"participants":["A","B","C"],"max_attempts":0}"#)
            .unwrap();

        let settings = Settings::load(&storage);
        assert_eq!(settings.max_attempts, None);

        let mut store = settings.store(MemoryStorage::new());
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        assert!(store.get_assignments(&mut rng).is_ok());
    }

    #[test]
    fn test_store_uses_configured_key() {
        let settings = Settings {
            assignments_key: "elsewhere".to_string(),
            ..Settings::default()
        };
        let store = settings.store(MemoryStorage::new());
        assert_eq!(store.key(), "elsewhere");
        assert_eq!(store.roster(), &settings.participants);
    }
}
