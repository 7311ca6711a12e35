//! Local store with an optional linked peer

use tracing::warn;

use super::{ConfigPatch, ConfigSnapshot, ConfigStore};
use crate::error::StoreResult;

/// Writes to a local store and mirrors every save to a linked peer
///
/// Loads always come from the local store. A failed mirror is logged and
/// does not fail the save.
pub struct MirroredStore<L, P> {
    local: L,
    peer: Option<P>,
}

impl<L: ConfigStore, P: ConfigStore> MirroredStore<L, P> {
    pub fn new(local: L, peer: Option<P>) -> Self {
        Self { local, peer }
    }

    pub fn is_linked(&self) -> bool {
        self.peer.is_some()
    }
}

impl<L: ConfigStore, P: ConfigStore> ConfigStore for MirroredStore<L, P> {
    fn load(&self) -> StoreResult<ConfigSnapshot> {
        self.local.load()
    }

    fn save(&self, patch: &ConfigPatch) -> StoreResult<()> {
        self.local.save(patch)?;

        if let Some(peer) = &self.peer {
            if let Err(e) = peer.save(patch) {
                warn!("Failed to mirror configuration to peer: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TimerMode;
    use crate::store::MemoryStore;

    #[test]
    fn test_saves_are_mirrored_to_peer() {
        let local = MemoryStore::new();
        let peer = MemoryStore::new();
        let store = MirroredStore::new(local.clone(), Some(peer.clone()));
        assert!(store.is_linked());

        store.save(&ConfigPatch::mode(TimerMode::Interval)).unwrap();
        assert_eq!(local.snapshot().mode, TimerMode::Interval);
        assert_eq!(peer.snapshot().mode, TimerMode::Interval);
    }

    #[test]
    fn test_peer_failure_does_not_fail_save() {
        let local = MemoryStore::new();
        let peer = MemoryStore::new();
        peer.fail_saves("peer offline");
        let store = MirroredStore::new(local.clone(), Some(peer.clone()));

        store.save(&ConfigPatch::mode(TimerMode::Countdown)).unwrap();
        assert_eq!(local.snapshot().mode, TimerMode::Countdown);
        assert_eq!(peer.snapshot().mode, TimerMode::Stopwatch);
    }

    #[test]
    fn test_local_failure_fails_save() {
        let local = MemoryStore::new();
        local.fail_saves("read-only");
        let store: MirroredStore<_, MemoryStore> = MirroredStore::new(local, None);
        assert!(!store.is_linked());
        assert!(store.save(&ConfigPatch::mode(TimerMode::Countdown)).is_err());
    }
}
