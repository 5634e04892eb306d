use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, Error, State};

/// Cloned states and computes handed to a command.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
    computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.insert(id, value);
    }

    pub fn state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "command snapshot"))
    }

    pub fn compute<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), "command snapshot"))
    }
}
