//! Audio cues played near the end of a countdown

use std::io::Write;

use clap::ValueEnum;
use tracing::debug;

/// Fire-and-forget cue player
///
/// Implementations must swallow their own failures; the engine never
/// looks at the outcome.
pub trait AudioCue: Send {
    fn play_cue(&self);
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play_cue(&self) {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            debug!("Could not ring terminal bell: {}", e);
        }
    }
}

/// Only logs the cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play_cue(&self) {
        debug!("Audio cue (silent)");
    }
}

/// Cue backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioBackend {
    Bell,
    Silent,
}

impl AudioBackend {
    pub fn build(self) -> Box<dyn AudioCue> {
        match self {
            AudioBackend::Bell => Box::new(TerminalBell),
            AudioBackend::Silent => Box::new(SilentCue),
        }
    }
}
