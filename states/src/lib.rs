//! Small reactive state runtime shared by the roster crates.
//!
//! - [`State`]: plain values mutated by UI handlers
//! - [`Compute`]: values derived from states, recomputed when an input is dirty
//! - [`Command`]: explicitly dispatched async side effects
//! - [`StateCtx`]: owns all of the above and drives the frame loop

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod runtime;
mod snapshot;
mod state;
mod state_sync_status;
mod task;

pub use command::Command;
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use runtime::{CommandFuture, StateRuntime, Updater};
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};
