//! Engine task: clock source plus command handling

use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    engine::{Command, TimerEngine, TimerSnapshot},
    state::{CommandEnvelope, TimerHandle},
};

/// Commands that may queue up before the engine task gets to them
const COMMAND_BUFFER: usize = 64;

/// Spawn the engine task and return a handle to it
pub fn spawn_timer_task(engine: TimerEngine, tick_period: Duration) -> TimerHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

    tokio::spawn(timer_task(engine, command_rx, snapshot_tx, tick_period));
    TimerHandle::new(command_tx, snapshot_rx)
}

/// Owns the engine for its whole life
///
/// Ticks and commands are handled in the same loop, so each one runs to
/// completion before the next starts. The task ends once every handle
/// has been dropped.
pub async fn timer_task(
    mut engine: TimerEngine,
    mut commands: mpsc::Receiver<CommandEnvelope>,
    snapshots: watch::Sender<TimerSnapshot>,
    tick_period: Duration,
) {
    info!("Starting timer task ({}ms ticks)", tick_period.as_millis());

    let mut clock = interval(tick_period);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = clock.tick() => {
                if engine.tick().changed {
                    snapshots.send_replace(engine.snapshot());
                }
            }

            envelope = commands.recv() => {
                let Some(CommandEnvelope { command, reply }) = envelope else {
                    break;
                };

                // The first second after a start should be a full one
                if matches!(command, Command::Start) && !engine.state().running {
                    clock.reset();
                }

                engine.dispatch(command);
                let snapshot = engine.snapshot();
                snapshots.send_replace(snapshot.clone());

                if let Some(reply) = reply {
                    if reply.send(snapshot).is_err() {
                        debug!("Command sender went away before the reply");
                    }
                }
            }
        }
    }

    info!("Timer task stopped");
}
