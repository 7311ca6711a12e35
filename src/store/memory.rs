//! In-memory configuration store

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ConfigPatch, ConfigSnapshot, ConfigStore};
use crate::error::{StoreError, StoreResult};

/// Shared in-memory store
///
/// Clones share the same snapshot, which lets a test keep a handle while
/// the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    snapshot: ConfigSnapshot,
    saves: Vec<ConfigPatch>,
    fail_saves: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ConfigSnapshot) -> Self {
        let store = Self::default();
        store.lock().snapshot = snapshot;
        store
    }

    /// Current stored snapshot
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.lock().snapshot.clone()
    }

    /// Every patch saved so far, oldest first
    pub fn saves(&self) -> Vec<ConfigPatch> {
        self.lock().saves.clone()
    }

    /// Make saves fail with `reason` until [`MemoryStore::recover`]
    pub fn fail_saves(&self, reason: &str) {
        self.lock().fail_saves = Some(reason.to_string());
    }

    pub fn recover(&self) {
        self.lock().fail_saves = None;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> StoreResult<ConfigSnapshot> {
        Ok(self.snapshot())
    }

    fn save(&self, patch: &ConfigPatch) -> StoreResult<()> {
        let mut inner = self.lock();
        if let Some(reason) = &inner.fail_saves {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        inner.snapshot.apply(patch);
        inner.saves.push(patch.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TimerMode;

    #[test]
    fn test_clones_share_snapshot() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.save(&ConfigPatch::mode(TimerMode::Countdown)).unwrap();
        assert_eq!(handle.snapshot().mode, TimerMode::Countdown);
        assert_eq!(handle.saves().len(), 1);
    }

    #[test]
    fn test_failure_injection() {
        let store = MemoryStore::new();
        store.fail_saves("disk full");
        let err = store.save(&ConfigPatch::mode(TimerMode::Interval)).unwrap_err();
        assert_eq!(err.to_string(), "store unavailable: disk full");
        assert_eq!(store.snapshot().mode, TimerMode::Stopwatch);

        store.recover();
        store.save(&ConfigPatch::mode(TimerMode::Interval)).unwrap();
        assert_eq!(store.snapshot().mode, TimerMode::Interval);
    }

    #[test]
    fn test_save_of_load_is_a_no_op() {
        let store = MemoryStore::with_snapshot(ConfigSnapshot {
            mode: TimerMode::Interval,
            sequence_mode_enabled: true,
            ..ConfigSnapshot::default()
        });
        let before = store.snapshot();
        store.save(&ConfigPatch::from(store.load().unwrap())).unwrap();
        assert_eq!(store.snapshot(), before);
    }
}
