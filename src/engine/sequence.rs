//! Ordered list of interval configs that run back to back

use tracing::{debug, warn};

use super::model::{IntervalConfig, TimerMode};
use super::state::{IntervalProgress, Session, TimerState};

impl TimerState {
    /// Swap in a new active interval config without disturbing a running
    /// session more than needed
    pub fn replace_active_config(&mut self, config: IntervalConfig) {
        self.interval_config = config.normalized();

        if self.mode() != TimerMode::Interval {
            return;
        }
        if self.mid_session() {
            if let Session::Interval(ref mut progress) = self.session {
                progress.clamp_to(&self.interval_config);
            }
        } else {
            self.completed = false;
            self.session = Session::Interval(IntervalProgress::start_of(&self.interval_config));
        }
    }

    /// Replace the user's own interval config
    ///
    /// The active config follows unless a sequence entry is driving the
    /// session.
    pub fn set_saved_interval_config(&mut self, config: IntervalConfig) {
        self.saved_interval_config = config.normalized();
        if self.sequence_head().is_none() {
            self.replace_active_config(self.saved_interval_config.clone());
        }
    }

    /// Go back to the saved config once no sequence drives an idle session
    fn restore_saved_config(&mut self) {
        if self.mode() == TimerMode::Interval && !self.mid_session() {
            self.replace_active_config(self.saved_interval_config.clone());
        }
    }

    pub fn add_to_sequence(&mut self, config: IntervalConfig) {
        self.sequence.push(config.normalized());
        debug!("Sequence now has {} entries", self.sequence.len());
    }

    /// Returns false when `index` is out of range
    pub fn remove_from_sequence(&mut self, index: usize) -> bool {
        if index >= self.sequence.len() {
            warn!("Ignoring removal of sequence entry {} (len {})", index, self.sequence.len());
            return false;
        }

        self.sequence.remove(index);
        if index <= self.sequence_index && self.sequence_index > 0 {
            self.sequence_index -= 1;
        }
        if self.sequence.is_empty() {
            self.sequence_index = 0;
        } else {
            self.sequence_index = self.sequence_index.min(self.sequence.len() - 1);
        }
        true
    }

    /// Returns false when `index` is out of range
    pub fn update_in_sequence(&mut self, index: usize, config: IntervalConfig) -> bool {
        let Some(slot) = self.sequence.get_mut(index) else {
            warn!("Ignoring update of sequence entry {} (len {})", index, self.sequence.len());
            return false;
        };

        let config = config.normalized();
        *slot = config.clone();
        if self.sequence_mode_enabled && index == self.sequence_index {
            self.replace_active_config(config);
        }
        true
    }

    pub fn clear_sequence(&mut self) {
        self.sequence.clear();
        self.sequence_index = 0;
        self.sequence_mode_enabled = false;
        self.restore_saved_config();
    }

    pub fn set_sequence_mode_enabled(&mut self, enabled: bool) {
        self.sequence_mode_enabled = enabled;
        if !enabled {
            self.restore_saved_config();
            return;
        }

        self.sequence_index = 0;
        if self.mode() == TimerMode::Interval && !self.mid_session() {
            if let Some(first) = self.sequence_head() {
                self.replace_active_config(first);
            }
        }
    }
}
