use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

use flume::{Receiver, Sender};
use log::{debug, error};

/// A change posted to the context from a compute or a running command.
pub(crate) enum Update {
    /// Replace the whole value registered under `id`.
    Assign {
        id: TypeId,
        name: &'static str,
        value: Box<dyn Any + Send>,
    },
    /// Mutate the state registered under `id` in place.
    Mutate {
        id: TypeId,
        name: &'static str,
        apply: Box<dyn FnOnce(&mut dyn Any) + Send>,
    },
}

impl Update {
    pub(crate) fn id(&self) -> TypeId {
        match self {
            Self::Assign { id, .. } | Self::Mutate { id, .. } => *id,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Assign { name, .. } | Self::Mutate { name, .. } => name,
        }
    }
}

/// Send-safe handle used by computes and commands to publish results.
///
/// Updates are queued and applied by [`crate::StateCtx::sync_computes`] on the
/// UI thread. Once the context is dropped the channel is disconnected and
/// updates are discarded, so a late network response can never touch a torn
/// down session.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Debug for Updater {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .finish()
    }
}

impl Updater {
    /// Replace the registered value of type `T`.
    pub fn set<T: Any + Send>(&self, value: T) {
        self.post(Update::Assign {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
        });
    }

    /// Mutate the registered state of type `T` in place.
    pub fn mutate<T: Any>(&self, apply: impl FnOnce(&mut T) + Send + 'static) {
        self.post(Update::Mutate {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply: Box::new(move |any: &mut dyn Any| {
                if let Some(target) = any.downcast_mut::<T>() {
                    apply(target);
                }
            }),
        });
    }

    fn post(&self, update: Update) {
        let name = update.name();
        if self.send.send(update).is_err() {
            debug!("State context is gone, discarding update for {name}");
        }
    }
}

#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub fn updater(&self) -> Updater {
        Updater {
            send: self.send.clone(),
        }
    }

    pub(crate) fn drain(&self) -> impl Iterator<Item = Update> + '_ {
        self.recv.try_iter()
    }
}

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Spawn a command future on the platform executor.
///
/// Returns `false` when no executor is available, in which case the future is dropped.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn spawn_task(task: CommandFuture) -> bool {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            drop(handle.spawn(task));
            true
        }
        Err(err) => {
            error!("No tokio runtime to run command on: {err}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn spawn_task(task: CommandFuture) -> bool {
    wasm_bindgen_futures::spawn_local(task);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updater_after_runtime_dropped_is_silent() {
        let runtime = StateRuntime::new();
        let updater = runtime.updater();
        drop(runtime);

        // Must not panic.
        updater.set(42_u32);
        updater.mutate::<u32>(|value| *value += 1);
    }

    #[test]
    fn updates_are_drained_in_order() {
        let runtime = StateRuntime::new();
        let updater = runtime.updater();
        updater.set(1_u32);
        updater.mutate::<String>(|value| value.push('x'));

        let ids: Vec<TypeId> = runtime.drain().map(|update| update.id()).collect();
        assert_eq!(ids, vec![TypeId::of::<u32>(), TypeId::of::<String>()]);
    }
}
