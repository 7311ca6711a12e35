//! Interval Timer - a tick-driven training timer
//!
//! This library provides the stopwatch, countdown and interval ("Tabata")
//! timer engine, its configuration stores and audio cues, and the HTTP
//! layer that drives it.

pub mod api;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{Command, TimerEngine, TimerSnapshot, TimerState};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
