//! Task management types for structured concurrency.
//!
//! - `TaskId`: identifies a spawned command run, combining the command's `TypeId`
//!   with a generation counter
//! - `TaskHandle`: wraps a run with its `CancellationToken` for cooperative cancellation
//!
//! `StateCtx` keeps one live handle per command type. Starting the same command
//! again cancels the previous run, and dropping the context cancels everything.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a spawned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A running task and the token used to cancel it.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, token: CancellationToken) -> Self {
        Self { id, token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Request cooperative cancellation. The task observes it through its token.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
