//! Timer engine: command surface around the pure transition function

use serde::Serialize;
use tracing::{debug, info, warn};

use super::format::format_clock;
use super::model::{CountdownConfig, IntervalConfig, TimerMode};
use super::state::{Session, TimerState};
use super::transition::{self, TickOutcome, TimerEvent};
use crate::audio::AudioCue;
use crate::store::{ConfigPatch, ConfigSnapshot, ConfigStore};

/// Most recent adapter errors kept for display
const MAX_ERRORS: usize = 8;

/// Everything the presentation layer can ask the engine to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetMode(TimerMode),
    UpdateIntervalConfig(IntervalConfig),
    UpdateCountdownConfig(CountdownConfig),
    Start,
    Pause,
    Reset,
    AddToSequence(IntervalConfig),
    RemoveFromSequence(usize),
    UpdateInSequence(usize, IntervalConfig),
    ClearSequence,
    SetSequenceModeEnabled(bool),
    /// Configuration received from a linked peer
    ApplyRemote(ConfigSnapshot),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetMode(_) => "set-mode",
            Command::UpdateIntervalConfig(_) => "update-interval-config",
            Command::UpdateCountdownConfig(_) => "update-countdown-config",
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::AddToSequence(_) => "add-to-sequence",
            Command::RemoveFromSequence(_) => "remove-from-sequence",
            Command::UpdateInSequence(..) => "update-in-sequence",
            Command::ClearSequence => "clear-sequence",
            Command::SetSequenceModeEnabled(_) => "set-sequence-mode",
            Command::ApplyRemote(_) => "apply-remote",
        }
    }
}

/// Read-only view handed to consumers after every command and tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub status: &'static str,
    pub clock: String,
    pub state: TimerState,
    pub errors: Vec<String>,
}

/// Owns the timer state and carries out the side effects of its changes
pub struct TimerEngine {
    state: TimerState,
    store: Box<dyn ConfigStore>,
    audio: Box<dyn AudioCue>,
    errors: Vec<String>,
}

impl TimerEngine {
    /// Create an idle engine seeded from the store
    pub fn new(store: Box<dyn ConfigStore>, audio: Box<dyn AudioCue>) -> Self {
        let mut errors = Vec::new();
        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Could not load timer configuration, using defaults: {}", e);
                errors.push(format!("Could not load configuration: {}", e));
                ConfigSnapshot::default()
            }
        };

        let state = TimerState::from_snapshot(snapshot);
        info!("Timer engine ready in {} mode", state.mode().as_str());
        Self { state, store, audio, errors }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.state.mode(),
            status: self.state.status_label(),
            clock: format_clock(self.state.display_seconds()),
            state: self.state.clone(),
            errors: self.errors.clone(),
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        debug!("Applying command: {}", command.name());
        match command {
            Command::SetMode(mode) => self.set_mode(mode),
            Command::UpdateIntervalConfig(config) => self.update_interval_config(config),
            Command::UpdateCountdownConfig(config) => self.update_countdown_config(config),
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::AddToSequence(config) => self.add_to_sequence(config),
            Command::RemoveFromSequence(index) => self.remove_from_sequence(index),
            Command::UpdateInSequence(index, config) => self.update_in_sequence(index, config),
            Command::ClearSequence => self.clear_sequence(),
            Command::SetSequenceModeEnabled(enabled) => self.set_sequence_mode_enabled(enabled),
            Command::ApplyRemote(snapshot) => self.apply_remote(snapshot),
        }
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        info!("Switching to {} mode", mode.as_str());
        self.state.reinitialize(mode);
        self.persist(ConfigPatch::mode(mode));
    }

    pub fn update_interval_config(&mut self, config: IntervalConfig) {
        self.state.set_saved_interval_config(config);
        self.persist(ConfigPatch::interval_config(self.state.saved_interval_config.clone()));
    }

    pub fn update_countdown_config(&mut self, config: CountdownConfig) {
        let config = config.normalized();
        self.state.countdown_config = config;
        if let Session::Countdown { ref mut remaining_seconds } = self.state.session {
            *remaining_seconds = config.total_seconds();
        }
        self.persist(ConfigPatch::countdown_config(config));
    }

    /// Resume counting from wherever the timer currently is
    pub fn start(&mut self) {
        self.state.running = true;
        self.state.paused = false;
        self.state.completed = false;
        info!("Timer started at {}", format_clock(self.state.display_seconds()));
    }

    pub fn pause(&mut self) {
        self.state.running = false;
        self.state.paused = true;
        debug!("Timer paused at {}", format_clock(self.state.display_seconds()));
    }

    pub fn reset(&mut self) {
        let mode = self.state.mode();
        self.state.reinitialize(mode);
        info!("Timer reset in {} mode", mode.as_str());
    }

    pub fn add_to_sequence(&mut self, config: IntervalConfig) {
        self.state.add_to_sequence(config);
        self.persist_sequence();
    }

    pub fn remove_from_sequence(&mut self, index: usize) {
        if self.state.remove_from_sequence(index) {
            self.persist_sequence();
        }
    }

    pub fn update_in_sequence(&mut self, index: usize, config: IntervalConfig) {
        if self.state.update_in_sequence(index, config) {
            self.persist_sequence();
        }
    }

    pub fn clear_sequence(&mut self) {
        self.state.clear_sequence();
        self.persist(ConfigPatch {
            sequence: Some(Vec::new()),
            sequence_mode_enabled: Some(false),
            ..ConfigPatch::default()
        });
    }

    pub fn set_sequence_mode_enabled(&mut self, enabled: bool) {
        self.state.set_sequence_mode_enabled(enabled);
        self.persist(ConfigPatch::sequence_mode_enabled(enabled));
    }

    /// Take over configuration from a linked peer
    ///
    /// Snapshots equal to our own persisted configuration are echoes of our
    /// own mirrored saves and are ignored.
    pub fn apply_remote(&mut self, snapshot: ConfigSnapshot) {
        if snapshot == self.state.config_snapshot() {
            return;
        }
        info!("Applying configuration from linked peer");

        let state = &mut self.state;
        state.countdown_config = snapshot.countdown_config.normalized();
        state.sequence = snapshot.sequence.iter().cloned().map(IntervalConfig::normalized).collect();
        state.sequence_mode_enabled = snapshot.sequence_mode_enabled;
        state.saved_interval_config = snapshot.interval_config.clone().normalized();

        if state.mid_session() && state.mode() == snapshot.mode {
            // Keep the running config when a sequence entry drives the session
            state.sequence_index = state.sequence_index.min(state.sequence.len().saturating_sub(1));
            if state.sequence_head().is_none() {
                state.interval_config = state.saved_interval_config.clone();
            }
            if let Session::Interval(ref mut progress) = state.session {
                progress.clamp_to(&state.interval_config);
            }
        } else {
            state.reinitialize(snapshot.mode);
        }

        let applied = self.state.config_snapshot();
        self.persist(ConfigPatch::from(applied));
    }

    /// Evaluate one clock pulse and carry out its effects
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = transition::tick(&mut self.state);

        if outcome.cue {
            self.audio.play_cue();
        }
        match outcome.event {
            Some(TimerEvent::PhaseChanged(phase)) => {
                debug!("Phase changed to {}", phase.label());
            }
            Some(TimerEvent::SetStarted(set)) => {
                info!("Starting set {}/{}", set, self.state.interval_config.sets);
            }
            Some(TimerEvent::SequenceAdvanced(index)) => {
                let name = self.state.interval_config.name.as_deref().unwrap_or("unnamed");
                info!("Advanced to sequence entry {} ({})", index + 1, name);
            }
            Some(TimerEvent::Completed) => info!("Timer completed"),
            None => {}
        }
        outcome
    }

    fn persist_sequence(&mut self) {
        self.persist(ConfigPatch::sequence(self.state.sequence.clone()));
    }

    fn persist(&mut self, patch: ConfigPatch) {
        match self.store.save(&patch) {
            Ok(()) => self.errors.clear(),
            Err(e) => {
                warn!("Failed to save timer configuration: {}", e);
                if self.errors.len() == MAX_ERRORS {
                    self.errors.remove(0);
                }
                self.errors.push(format!("Could not save configuration: {}", e));
            }
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
