use std::any::{Any, type_name};
use std::fmt::Debug;

use log::error;

/// A value owned by [`crate::StateCtx`] and mutated by UI handlers.
///
/// Mutating a state through [`crate::StateCtx::update`] marks it dirty, which
/// makes every compute depending on it run again on the next
/// [`crate::StateCtx::run_computed`].
pub trait State: Any + Debug {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Cloned copy handed to commands.
    ///
    /// States that no command reads can keep the default.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if it has the same concrete type.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("Failed to assign state, expected {}", type_name::<T>()),
    }
}
