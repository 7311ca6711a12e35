//! Timer state owned by the engine

use serde::{Deserialize, Serialize};

use super::model::{CountdownConfig, IntervalConfig, TimerMode};
use crate::store::ConfigSnapshot;

/// Phase of an interval session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPhase {
    Work,
    Rest,
    SetRest,
}

impl IntervalPhase {
    pub fn label(&self) -> &'static str {
        match self {
            IntervalPhase::Work => "Work",
            IntervalPhase::Rest => "Rest",
            IntervalPhase::SetRest => "Set Rest",
        }
    }
}

/// Position inside an interval session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalProgress {
    pub remaining_seconds: u32,
    pub cycle_index: u32,
    pub set_index: u32,
    pub phase: IntervalPhase,
}

impl IntervalProgress {
    /// First work phase of `config`
    pub fn start_of(config: &IntervalConfig) -> Self {
        Self {
            remaining_seconds: config.work_seconds,
            cycle_index: 1,
            set_index: 1,
            phase: IntervalPhase::Work,
        }
    }

    /// Keep indices inside the bounds of a (possibly smaller) config
    pub fn clamp_to(&mut self, config: &IntervalConfig) {
        self.cycle_index = self.cycle_index.clamp(1, config.cycles.max(1));
        self.set_index = self.set_index.clamp(1, config.sets.max(1));
    }
}

/// Volatile per-mode fields, tagged by mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Session {
    Stopwatch {
        #[serde(rename = "elapsedSeconds")]
        elapsed_seconds: u64,
    },
    Countdown {
        #[serde(rename = "remainingSeconds")]
        remaining_seconds: u32,
    },
    Interval(IntervalProgress),
}

impl Session {
    pub fn mode(&self) -> TimerMode {
        match self {
            Session::Stopwatch { .. } => TimerMode::Stopwatch,
            Session::Countdown { .. } => TimerMode::Countdown,
            Session::Interval(_) => TimerMode::Interval,
        }
    }
}

/// The single mutable aggregate behind every timer mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Config the interval session is running, a sequence entry when one
    /// is driving the session
    pub interval_config: IntervalConfig,
    /// The user's own interval config, the one that gets persisted
    pub saved_interval_config: IntervalConfig,
    pub countdown_config: CountdownConfig,
    pub sequence: Vec<IntervalConfig>,
    pub sequence_index: usize,
    pub sequence_mode_enabled: bool,
    pub running: bool,
    pub paused: bool,
    pub completed: bool,
    pub session: Session,
}

impl TimerState {
    /// Build an idle state from persisted configuration
    pub fn from_snapshot(snapshot: ConfigSnapshot) -> Self {
        let interval_config = snapshot.interval_config.normalized();
        let mut state = Self {
            interval_config: interval_config.clone(),
            saved_interval_config: interval_config,
            countdown_config: snapshot.countdown_config.normalized(),
            sequence: snapshot.sequence.into_iter().map(IntervalConfig::normalized).collect(),
            sequence_index: 0,
            sequence_mode_enabled: snapshot.sequence_mode_enabled,
            running: false,
            paused: false,
            completed: false,
            session: Session::Stopwatch { elapsed_seconds: 0 },
        };
        state.reinitialize(snapshot.mode);
        state
    }

    /// Persistable slice of this state
    pub fn config_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            mode: self.mode(),
            interval_config: self.saved_interval_config.clone(),
            countdown_config: self.countdown_config,
            sequence: self.sequence.clone(),
            sequence_mode_enabled: self.sequence_mode_enabled,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.session.mode()
    }

    /// Put the timer into idle state for `mode`, reloading the first
    /// sequence entry when sequence mode is on and the saved config otherwise
    pub fn reinitialize(&mut self, mode: TimerMode) {
        self.running = false;
        self.paused = false;
        self.completed = false;
        self.sequence_index = 0;
        self.session = match mode {
            TimerMode::Stopwatch => Session::Stopwatch { elapsed_seconds: 0 },
            TimerMode::Countdown => Session::Countdown {
                remaining_seconds: self.countdown_config.total_seconds(),
            },
            TimerMode::Interval => {
                self.interval_config = self
                    .sequence_head()
                    .unwrap_or_else(|| self.saved_interval_config.clone());
                Session::Interval(IntervalProgress::start_of(&self.interval_config))
            }
        };
    }

    /// First sequence entry, if sequence mode is on and there is one
    pub fn sequence_head(&self) -> Option<IntervalConfig> {
        if self.sequence_mode_enabled {
            self.sequence.first().cloned()
        } else {
            None
        }
    }

    /// Started and not yet reset, whether currently counting or paused
    pub fn mid_session(&self) -> bool {
        self.running || self.paused
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        match self.session {
            Session::Stopwatch { .. } => None,
            Session::Countdown { remaining_seconds } => Some(remaining_seconds),
            Session::Interval(progress) => Some(progress.remaining_seconds),
        }
    }

    pub fn elapsed_seconds(&self) -> Option<u64> {
        match self.session {
            Session::Stopwatch { elapsed_seconds } => Some(elapsed_seconds),
            _ => None,
        }
    }

    pub fn interval_progress(&self) -> Option<&IntervalProgress> {
        match &self.session {
            Session::Interval(progress) => Some(progress),
            _ => None,
        }
    }

    pub fn cycle_index(&self) -> u32 {
        self.interval_progress().map_or(1, |p| p.cycle_index)
    }

    pub fn set_index(&self) -> u32 {
        self.interval_progress().map_or(1, |p| p.set_index)
    }

    pub fn work_phase_active(&self) -> bool {
        self.interval_progress()
            .map_or(false, |p| p.phase == IntervalPhase::Work)
    }

    pub fn set_rest_active(&self) -> bool {
        self.interval_progress()
            .map_or(false, |p| p.phase == IntervalPhase::SetRest)
    }

    /// Seconds shown on the clock face for the current mode
    pub fn display_seconds(&self) -> u64 {
        match self.session {
            Session::Stopwatch { elapsed_seconds } => elapsed_seconds,
            Session::Countdown { remaining_seconds } => u64::from(remaining_seconds),
            Session::Interval(progress) => u64::from(progress.remaining_seconds),
        }
    }

    /// Short human label: idle, running, paused or completed
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "completed"
        } else if self.running {
            "running"
        } else if self.paused {
            "paused"
        } else {
            "idle"
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::from_snapshot(ConfigSnapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_snapshot_is_idle() {
        let snapshot = ConfigSnapshot {
            mode: TimerMode::Countdown,
            countdown_config: CountdownConfig::new(1, 30),
            ..ConfigSnapshot::default()
        };
        let state = TimerState::from_snapshot(snapshot.clone());
        assert_eq!(state.mode(), TimerMode::Countdown);
        assert_eq!(state.remaining_seconds(), Some(90));
        assert!(!state.running && !state.paused && !state.completed);
        assert_eq!(state.config_snapshot(), snapshot);
    }

    #[test]
    fn test_interval_uses_sequence_head() {
        let snapshot = ConfigSnapshot {
            mode: TimerMode::Interval,
            sequence: vec![IntervalConfig::new(45, 15, 3, 1, 0)],
            sequence_mode_enabled: true,
            ..ConfigSnapshot::default()
        };
        let state = TimerState::from_snapshot(snapshot.clone());
        assert_eq!(state.interval_config.work_seconds, 45);
        assert_eq!(state.remaining_seconds(), Some(45));
        assert!(state.work_phase_active());
        assert!(!state.set_rest_active());

        // The sequence copy is never what gets persisted
        assert_eq!(state.saved_interval_config, IntervalConfig::default());
        assert_eq!(state.config_snapshot(), snapshot);
    }

    #[test]
    fn test_reinitialize_without_sequence_loads_saved_config() {
        let mut state = TimerState::from_snapshot(ConfigSnapshot {
            mode: TimerMode::Interval,
            sequence: vec![IntervalConfig::new(45, 15, 3, 1, 0)],
            sequence_mode_enabled: true,
            ..ConfigSnapshot::default()
        });
        state.sequence_mode_enabled = false;
        state.reinitialize(TimerMode::Interval);
        assert_eq!(state.interval_config, IntervalConfig::default());
        assert_eq!(state.remaining_seconds(), Some(IntervalConfig::DEFAULT_WORK_SECONDS));
    }

    #[test]
    fn test_stopwatch_has_no_interval_fields() {
        let state = TimerState::default();
        assert_eq!(state.mode(), TimerMode::Stopwatch);
        assert_eq!(state.elapsed_seconds(), Some(0));
        assert_eq!(state.remaining_seconds(), None);
        assert!(!state.work_phase_active());
        assert_eq!(state.cycle_index(), 1);
    }

    #[test]
    fn test_clamp_progress_to_smaller_config() {
        let mut progress = IntervalProgress {
            remaining_seconds: 4,
            cycle_index: 6,
            set_index: 3,
            phase: IntervalPhase::Rest,
        };
        progress.clamp_to(&IntervalConfig::new(20, 10, 2, 1, 0));
        assert_eq!(progress.cycle_index, 2);
        assert_eq!(progress.set_index, 1);
    }

    #[test]
    fn test_session_serializes_with_mode_tag() {
        let session = Session::Interval(IntervalProgress::start_of(&IntervalConfig::default()));
        let json = serde_json::to_value(session).unwrap();
        assert_eq!(json["mode"], "interval");
        assert_eq!(json["remainingSeconds"], 20);
        assert_eq!(json["phase"], "work");
    }
}
