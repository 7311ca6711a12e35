//! Pure per-tick state transition
//!
//! Nothing in here performs I/O. Side effects the shell has to carry out
//! (the audio cue) are returned in a [`TickOutcome`].

use super::state::{IntervalPhase, IntervalProgress, Session, TimerState};

/// Remaining-second values that trigger an audio cue
const CUE_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

/// Notable things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Switched between work, rest and set rest within the same set
    PhaseChanged(IntervalPhase),
    /// A new set started with its first work phase
    SetStarted(u32),
    /// Moved on to the sequence entry at this index
    SequenceAdvanced(usize),
    Completed,
}

/// Result of evaluating one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub changed: bool,
    pub cue: bool,
    pub event: Option<TimerEvent>,
}

impl TickOutcome {
    fn changed() -> Self {
        Self { changed: true, ..Self::default() }
    }

    fn with_event(event: TimerEvent) -> Self {
        Self { changed: true, cue: false, event: Some(event) }
    }
}

/// Advance the timer by one second
pub fn tick(state: &mut TimerState) -> TickOutcome {
    if !state.running || state.paused {
        return TickOutcome::default();
    }

    match state.session {
        Session::Stopwatch { ref mut elapsed_seconds } => {
            *elapsed_seconds += 1;
            TickOutcome::changed()
        }
        Session::Countdown { ref mut remaining_seconds } => {
            if *remaining_seconds > 0 {
                *remaining_seconds -= 1;
                TickOutcome {
                    changed: true,
                    cue: CUE_RANGE.contains(&*remaining_seconds),
                    event: None,
                }
            } else {
                state.running = false;
                state.completed = true;
                TickOutcome::with_event(TimerEvent::Completed)
            }
        }
        Session::Interval(mut progress) => {
            if progress.remaining_seconds > 0 {
                progress.remaining_seconds -= 1;
                if progress.remaining_seconds > 0 {
                    state.session = Session::Interval(progress);
                    return TickOutcome {
                        changed: true,
                        cue: CUE_RANGE.contains(&progress.remaining_seconds),
                        event: None,
                    };
                }
            }
            phase_transition(state, progress)
        }
    }
}

/// Leave a phase that has run down to zero
fn phase_transition(state: &mut TimerState, mut progress: IntervalProgress) -> TickOutcome {
    let config = &state.interval_config;

    let event = match progress.phase {
        IntervalPhase::SetRest => {
            if progress.set_index < config.sets {
                progress.set_index += 1;
                progress.cycle_index = 1;
                progress.phase = IntervalPhase::Work;
                progress.remaining_seconds = config.work_seconds;
                TimerEvent::SetStarted(progress.set_index)
            } else {
                return sequence_advance_or_complete(state, progress);
            }
        }
        IntervalPhase::Work => {
            progress.phase = IntervalPhase::Rest;
            progress.remaining_seconds = config.rest_seconds;
            TimerEvent::PhaseChanged(IntervalPhase::Rest)
        }
        IntervalPhase::Rest => {
            if progress.cycle_index < config.cycles {
                progress.cycle_index += 1;
                progress.phase = IntervalPhase::Work;
                progress.remaining_seconds = config.work_seconds;
                TimerEvent::PhaseChanged(IntervalPhase::Work)
            } else if progress.set_index < config.sets {
                progress.phase = IntervalPhase::SetRest;
                progress.remaining_seconds = config.rest_between_sets_seconds;
                TimerEvent::PhaseChanged(IntervalPhase::SetRest)
            } else {
                return sequence_advance_or_complete(state, progress);
            }
        }
    };

    state.session = Session::Interval(progress);
    TickOutcome::with_event(event)
}

/// Load the next sequence entry, or finish the session
fn sequence_advance_or_complete(
    state: &mut TimerState,
    mut progress: IntervalProgress,
) -> TickOutcome {
    let next = state.sequence_index + 1;
    if state.sequence_mode_enabled && next < state.sequence.len() {
        state.sequence_index = next;
        state.interval_config = state.sequence[next].clone();
        state.session = Session::Interval(IntervalProgress::start_of(&state.interval_config));
        state.running = true;
        state.completed = false;
        TickOutcome::with_event(TimerEvent::SequenceAdvanced(next))
    } else {
        progress.remaining_seconds = 0;
        state.session = Session::Interval(progress);
        state.running = false;
        state.completed = true;
        TickOutcome::with_event(TimerEvent::Completed)
    }
}
