//! Secret Santa - random gift assignments that stick
//!
//! Core modules:
//! - `roster`: Validated participant list
//! - `derive`: Random derangement generation (shuffle, assign, retry)
//! - `validate`: Bijection / no-self-assignment checks
//! - `store`: Lazily derived, persisted assignments with reset
//! - `persistence`: Key-value storage backends (memory, file, LocalStorage)
//! - `commands`: Handlers the UI calls into
//! - `settings`: Persisted configuration

pub mod assignments;
pub mod commands;
pub mod derive;
pub mod error;
pub mod persistence;
pub mod roster;
pub mod settings;
pub mod store;
pub mod validate;

pub use assignments::Assignments;
pub use commands::{
    ResetOutcome, StartupStatus, reset_assignments, show_assignment, startup_check,
};
pub use derive::{Deriver, derive_assignments};
pub use error::{Error, Result};
pub use persistence::{MemoryStorage, Storage, StorageError};
pub use roster::{InvalidRoster, Roster};
pub use settings::Settings;
pub use store::AssignmentStore;
pub use validate::{Violation, is_valid, validate};

/// Well-known names and storage keys
pub mod consts {
    /// LocalStorage key holding the serialized assignments
    pub const ASSIGNMENTS_KEY: &str = "secretSantaAssignments";
    /// LocalStorage key holding the settings
    pub const SETTINGS_KEY: &str = "secret_santa_settings";

    /// Participants used when no settings are stored
    pub const DEFAULT_PARTICIPANTS: [&str; 15] = [
        "Emma Thompson",
        "Michael Chen",
        "Sarah Martinez",
        "James Wilson",
        "Priya Patel",
        "David Kim",
        "Lisa Anderson",
        "Marcus Johnson",
        "Rachel Foster",
        "Alex Rodriguez",
        "Nina Kowalski",
        "Tom Bradley",
        "Olivia Wright",
        "Chris Murphy",
        "Maya Gupta",
    ];
}
