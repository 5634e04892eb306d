use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::ctx::Slot;
use crate::{Compute, Error, State};

/// Read-only view of the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Slot<dyn State>>,
    computes: &'a BTreeMap<TypeId, Slot<dyn Compute>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Slot<dyn State>>,
        computes: &'a BTreeMap<TypeId, Slot<dyn Compute>>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "compute dependency"))
    }

    /// # Panics
    /// Panics if `T` was not registered, which means `deps()` lies about its inputs.
    pub fn state<T: State>(&self) -> &'a T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&'a T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), "compute dependency"))
    }

    /// # Panics
    /// Panics if `T` was not registered.
    pub fn compute<T: Compute>(&self) -> &'a T {
        self.try_compute::<T>().unwrap_or_else(|err| panic!("{err}"))
    }
}
