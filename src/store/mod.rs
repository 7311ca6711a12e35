//! Configuration persistence
//!
//! Only configuration is persisted, never the volatile session fields.
//! Every key of [`ConfigSnapshot`] can be saved on its own through a
//! [`ConfigPatch`].

pub mod file;
pub mod memory;
pub mod mirror;

use serde::{Deserialize, Serialize};

use crate::engine::{CountdownConfig, IntervalConfig, TimerMode};
use crate::error::StoreResult;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use mirror::MirroredStore;

/// Everything about the timer that survives a restart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub mode: TimerMode,
    pub interval_config: IntervalConfig,
    pub countdown_config: CountdownConfig,
    pub sequence: Vec<IntervalConfig>,
    pub sequence_mode_enabled: bool,
}

impl ConfigSnapshot {
    /// Overwrite the fields present in `patch`
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(config) = &patch.interval_config {
            self.interval_config = config.clone();
        }
        if let Some(config) = patch.countdown_config {
            self.countdown_config = config;
        }
        if let Some(sequence) = &patch.sequence {
            self.sequence = sequence.clone();
        }
        if let Some(enabled) = patch.sequence_mode_enabled {
            self.sequence_mode_enabled = enabled;
        }
    }
}

/// A partial snapshot; absent fields are left untouched on save
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_config: Option<IntervalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown_config: Option<CountdownConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<IntervalConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_mode_enabled: Option<bool>,
}

impl ConfigPatch {
    pub fn mode(mode: TimerMode) -> Self {
        Self { mode: Some(mode), ..Self::default() }
    }

    pub fn interval_config(config: IntervalConfig) -> Self {
        Self { interval_config: Some(config), ..Self::default() }
    }

    pub fn countdown_config(config: CountdownConfig) -> Self {
        Self { countdown_config: Some(config), ..Self::default() }
    }

    pub fn sequence(sequence: Vec<IntervalConfig>) -> Self {
        Self { sequence: Some(sequence), ..Self::default() }
    }

    pub fn sequence_mode_enabled(enabled: bool) -> Self {
        Self { sequence_mode_enabled: Some(enabled), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Patch onto the defaults, so documents with missing keys still load
    pub fn into_snapshot(self) -> ConfigSnapshot {
        let mut snapshot = ConfigSnapshot::default();
        snapshot.apply(&self);
        snapshot
    }
}

impl From<ConfigSnapshot> for ConfigPatch {
    fn from(snapshot: ConfigSnapshot) -> Self {
        Self {
            mode: Some(snapshot.mode),
            interval_config: Some(snapshot.interval_config),
            countdown_config: Some(snapshot.countdown_config),
            sequence: Some(snapshot.sequence),
            sequence_mode_enabled: Some(snapshot.sequence_mode_enabled),
        }
    }
}

/// Load/save interface the engine persists through
///
/// Implementations report their own failures; the engine logs them and
/// keeps running.
pub trait ConfigStore: Send {
    fn load(&self) -> StoreResult<ConfigSnapshot>;

    fn save(&self, patch: &ConfigPatch) -> StoreResult<()>;
}
