//! Channel handle to the engine task

use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    engine::{Command, TimerSnapshot},
    error::EngineError,
};

/// A command plus where to send the resulting snapshot
#[derive(Debug)]
pub struct CommandEnvelope {
    pub command: Command,
    pub reply: Option<oneshot::Sender<TimerSnapshot>>,
}

/// Cloneable handle used by HTTP handlers and background tasks
///
/// The engine itself lives in its own task; this handle only sends
/// commands and reads published snapshots.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<CommandEnvelope>,
    snapshots: watch::Receiver<TimerSnapshot>,
}

impl TimerHandle {
    pub fn new(
        commands: mpsc::Sender<CommandEnvelope>,
        snapshots: watch::Receiver<TimerSnapshot>,
    ) -> Self {
        Self { commands, snapshots }
    }

    /// Apply a command and wait for the state it produced
    pub async fn send(&self, command: Command) -> Result<TimerSnapshot, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(CommandEnvelope { command, reply: Some(reply_tx) })
            .await
            .map_err(|_| EngineError::Stopped)?;
        reply_rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Queue a command without waiting for it to be applied
    pub async fn notify(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(CommandEnvelope { command, reply: None })
            .await
            .map_err(|_| EngineError::Stopped)
    }

    /// Latest published snapshot
    pub fn current(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }
}
