//! Serialized command queue
//!
//! A single Tokio task owns the [`ExpressionEngine`]. Front-ends send
//! commands through an [`EngineHandle`]; the task applies them strictly one
//! at a time, so no two commands ever see the same state snapshot.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::core::history::HistoryEntry;
use crate::core::{CalcError, Command, EngineState, ExpressionEngine};
use crate::remote::Arithmetic;

/// Queue depth before senders wait
const QUEUE_CAPACITY: usize = 64;

/// Errors from the queue
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueueError {
    /// The engine task has stopped
    #[error("engine task has stopped")]
    Closed,
    /// The command itself failed
    #[error(transparent)]
    Calc(#[from] CalcError),
}

enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<Result<EngineState, CalcError>>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineState>,
    },
    History {
        reply: oneshot::Sender<Vec<HistoryEntry>>,
    },
}

/// Cloneable handle to an engine task
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
}

impl EngineHandle {
    /// Spawns an engine task using local arithmetic.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(engine: ExpressionEngine) -> Self {
        Self::spawn_inner(engine, None)
    }

    /// Spawns an engine task that delegates `=` arithmetic
    #[must_use]
    pub fn spawn_with(engine: ExpressionEngine, arithmetic: Arc<dyn Arithmetic>) -> Self {
        Self::spawn_inner(engine, Some(arithmetic))
    }

    fn spawn_inner(engine: ExpressionEngine, arithmetic: Option<Arc<dyn Arithmetic>>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(run(engine, rx, arithmetic));
        Self { tx }
    }

    /// Queues a command and waits for the resulting state
    pub async fn send(&self, command: Command) -> Result<EngineState, QueueError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Command { command, reply })
            .await
            .map_err(|_| QueueError::Closed)?;
        Ok(rx.await.map_err(|_| QueueError::Closed)??)
    }

    /// Current state, after every previously queued command
    pub async fn snapshot(&self) -> Result<EngineState, QueueError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| QueueError::Closed)?;
        rx.await.map_err(|_| QueueError::Closed)
    }

    /// History entries, oldest first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, QueueError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::History { reply })
            .await
            .map_err(|_| QueueError::Closed)?;
        rx.await.map_err(|_| QueueError::Closed)
    }
}

async fn run(
    mut engine: ExpressionEngine,
    mut rx: mpsc::Receiver<Request>,
    arithmetic: Option<Arc<dyn Arithmetic>>,
) {
    while let Some(request) = rx.recv().await {
        match request {
            Request::Command { command, reply } => {
                let outcome = match &arithmetic {
                    Some(arithmetic) => engine
                        .dispatch_with(command, arithmetic.as_ref())
                        .await
                        .cloned(),
                    None => engine.dispatch(command).cloned(),
                };
                // the caller may have given up waiting
                let _ = reply.send(outcome);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(engine.state().clone());
            }
            Request::History { reply } => {
                let _ = reply.send(engine.history().iter().cloned().collect());
            }
        }
    }
    debug!("engine queue closed");
}
