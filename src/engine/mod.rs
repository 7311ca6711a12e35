//! Timer engine
//!
//! The stopwatch, countdown and interval state machine. [`transition`] holds
//! the pure per-tick logic, [`timer`] the command surface that persists
//! configuration and plays audio cues.

pub mod format;
pub mod model;
pub mod sequence;
pub mod state;
pub mod timer;
pub mod transition;

// Re-export main types
pub use format::format_clock;
pub use model::{CountdownConfig, IntervalConfig, TimerMode};
pub use state::{IntervalPhase, IntervalProgress, Session, TimerState};
pub use timer::{Command, TimerEngine, TimerSnapshot};
pub use transition::{TickOutcome, TimerEvent};
