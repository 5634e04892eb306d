use std::any::Any;
use std::fmt::Debug;

use tokio_util::sync::CancellationToken;

use crate::{CommandFuture, CommandSnapshot, Updater};

/// An explicitly dispatched side effect (network IO, timers).
///
/// Commands never run implicitly: they are queued with
/// [`crate::StateCtx::enqueue_command`] and started by
/// [`crate::StateCtx::flush_commands`]. They read a cloned
/// [`CommandSnapshot`] of the context and report back through the [`Updater`].
///
/// The `cancel` token is cancelled when the context is dropped or when the same
/// command is started again; check it before publishing results.
pub trait Command: Any + Debug + Send + Sync {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}
