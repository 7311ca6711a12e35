//! JSON file backed configuration store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::{ConfigPatch, ConfigSnapshot, ConfigStore};
use crate::error::{StoreError, StoreResult};

/// Stores the whole snapshot as one JSON document
///
/// Saves read the current document, merge the patch and replace the file
/// through a temporary sibling so a crash never leaves half a document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or `None` if it does not exist yet
    pub fn load_existing(&self) -> StoreResult<Option<ConfigSnapshot>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let patch: ConfigPatch = serde_json::from_str(&contents)?;
        Ok(Some(patch.into_snapshot()))
    }

    fn write(&self, snapshot: &ConfigSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!("Wrote timer configuration to {}", self.path.display());
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> StoreResult<ConfigSnapshot> {
        Ok(self.load_existing()?.unwrap_or_default())
    }

    fn save(&self, patch: &ConfigPatch) -> StoreResult<()> {
        let mut snapshot = self.load()?;
        snapshot.apply(patch);
        self.write(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CountdownConfig, IntervalConfig, TimerMode};

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("timer.json"))
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load_existing().unwrap(), None);
        assert_eq!(store.load().unwrap(), ConfigSnapshot::default());
    }

    #[test]
    fn test_save_merges_partial_patches() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&ConfigPatch::mode(TimerMode::Interval)).unwrap();
        store
            .save(&ConfigPatch::countdown_config(CountdownConfig::new(12, 30)))
            .unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.mode, TimerMode::Interval);
        assert_eq!(snapshot.countdown_config, CountdownConfig::new(12, 30));
        assert!(!dir.path().join("timer.json.tmp").exists());
    }

    #[test]
    fn test_save_of_load_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let snapshot = ConfigSnapshot {
            mode: TimerMode::Interval,
            interval_config: IntervalConfig::new(40, 20, 5, 3, 120).named("rounds"),
            sequence: vec![IntervalConfig::new(5, 5, 1, 1, 0), IntervalConfig::default()],
            sequence_mode_enabled: true,
            ..ConfigSnapshot::default()
        };
        store.save(&ConfigPatch::from(snapshot.clone())).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        store.save(&ConfigPatch::from(store.load().unwrap())).unwrap();
        let after = fs::read_to_string(store.path()).unwrap();

        assert_eq!(before, after);
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/dir/timer.json"));
        store.save(&ConfigPatch::sequence_mode_enabled(true)).unwrap();
        assert!(store.load().unwrap().sequence_mode_enabled);
    }
}
