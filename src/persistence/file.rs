//! JSON-file storage for native builds
//!
//! All slots live in one JSON object. The file is read once on open and
//! rewritten in full on every mutation via a temp file + rename. A file that
//! does not parse is moved aside to `<path>.bak` and the storage starts empty.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let slots = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(slots) => slots,
                Err(e) => {
                    let backup = sibling(&path, "bak");
                    log::warn!(
                        "Unreadable storage file {} ({}), moving it to {}",
                        path.display(),
                        e,
                        backup.display()
                    );
                    fs::rename(&path, &backup)?;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened storage file {} ({} keys)", path.display(), slots.len());
        Ok(Self { path, slots })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.slots)?;
        let tmp = sibling(&self.path, "tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// `path` with `.suffix` appended to the full file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.slots.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ASSIGNMENTS_KEY;
    use crate::roster::Roster;
    use crate::store::AssignmentStore;
    use crate::validate::is_valid;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", r#"{"A":"B"}"#).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some(r#"{"A":"B"}"#));
    }

    #[test]
    fn test_remove_absent_key_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.remove("missing").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_garbage_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let garbage = r#"{"secretSantaAssignments": "{\"A\":\"B\""#;
        fs::write(&path, garbage).unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get(ASSIGNMENTS_KEY).unwrap(), None);
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("store.json.bak")).unwrap(),
            garbage
        );
    }

    #[test]
    fn test_store_regenerates_over_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let roster = Roster::new(["A", "B", "C"]).unwrap();
        let mut store = AssignmentStore::new(roster, FileStorage::open(&path).unwrap());
        let assignments = store
            .get_assignments(&mut Pcg32::seed_from_u64(1))
            .unwrap();
        assert!(is_valid(&assignments, store.roster()));

        let reopened = AssignmentStore::new(
            store.roster().clone(),
            FileStorage::open(&path).unwrap(),
        );
        assert_eq!(reopened.load().unwrap(), Some(assignments));
    }

    #[test]
    fn test_tmp_named_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.tmp");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("k", "v").unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("store.tmp.tmp").exists());

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }
}
