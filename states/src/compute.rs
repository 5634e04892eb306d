use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

use log::error;

use crate::{Dep, State, Updater};

/// Ids of the states and computes a compute reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// No dependencies. Used by compute-shaped caches that only commands write.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TypeId> {
        self.states.iter().chain(self.computes.iter())
    }
}

/// A value derived from states (and other computes).
///
/// `compute` never writes to `self` directly: it publishes the new value
/// through the [`Updater`], and the context assigns it right after the call.
/// Skipping the `updater.set` leaves the cached value untouched, which is how
/// memoized computes avoid needless work.
pub trait Compute: Any + Debug {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if it has the same concrete type.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("Failed to assign compute, expected {}", type_name::<T>()),
    }
}
