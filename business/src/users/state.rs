//! States behind the users table.
//!
//! - `UsersState`: the Snapshot (set once) and the WorkingSet (shrinks on delete,
//!   restored on reset), plus the one-shot load flag
//! - `ViewControls`: the inputs of the derivation (country filter, sort flag)
//! - `TableStyle`: purely presentational flags
//!
//! Coloring lives apart from `ViewControls` so that flipping it never dirties
//! `DerivedUsersCompute`.

use std::any::Any;
use std::sync::Arc;

use log::debug;
use roster_states::{State, state_assign_impl};

use crate::users::UserEntity;

#[derive(Debug, Default, Clone)]
pub struct UsersState {
    snapshot: Option<Arc<[UserEntity]>>,
    working: Vec<UserEntity>,
    /// Bumped on every WorkingSet mutation; part of the derivation memo key.
    version: u64,
    load_requested: bool,
}

impl UsersState {
    /// The users as originally fetched, `None` before the first successful load.
    pub fn snapshot(&self) -> Option<&[UserEntity]> {
        self.snapshot.as_deref()
    }

    pub fn working(&self) -> &[UserEntity] {
        &self.working
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn load_requested(&self) -> bool {
        self.load_requested
    }

    /// Claim the one-shot initial load. Returns `true` only for the first caller.
    pub fn claim_initial_load(&mut self) -> bool {
        if self.load_requested {
            return false;
        }
        self.load_requested = true;
        true
    }

    /// Store the first successful fetch as both Snapshot and WorkingSet.
    ///
    /// Returns `false` and changes nothing if a Snapshot already exists.
    pub fn install_snapshot(&mut self, users: Vec<UserEntity>) -> bool {
        if self.snapshot.is_some() {
            return false;
        }
        self.working = users.clone();
        self.snapshot = Some(Arc::from(users));
        self.version += 1;
        true
    }

    /// Remove the first user with this id. Unknown ids are a no-op.
    pub fn delete_user(&mut self, id: &str) -> bool {
        let Some(index) = self.working.iter().position(|user| user.id.as_str() == id) else {
            debug!("delete_user: {id} is not in the working set");
            return false;
        };
        self.working.remove(index);
        self.version += 1;
        true
    }

    /// Replace the WorkingSet with a fresh copy of the Snapshot.
    ///
    /// Returns `false` before the first successful load.
    pub fn reset_to_snapshot(&mut self) -> bool {
        let Some(snapshot) = &self.snapshot else {
            debug!("reset_to_snapshot: nothing loaded yet");
            return false;
        };
        self.working = snapshot.to_vec();
        self.version += 1;
        true
    }
}

impl State for UsersState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Inputs of the derivation pipeline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewControls {
    sort_by_country: bool,
    filter_country: Option<String>,
}

impl ViewControls {
    pub fn sort_by_country(&self) -> bool {
        self.sort_by_country
    }

    /// The filter text exactly as typed.
    pub fn filter_country(&self) -> Option<&str> {
        self.filter_country.as_deref()
    }

    /// The filter text if it actually filters; an empty string means no filter.
    pub fn active_filter(&self) -> Option<&str> {
        self.filter_country().filter(|text| !text.is_empty())
    }

    pub fn toggle_sort_by_country(&mut self) {
        self.sort_by_country = !self.sort_by_country;
    }

    /// Replace the filter verbatim, without trimming.
    pub fn set_filter_country(&mut self, text: impl Into<String>) {
        self.filter_country = Some(text.into());
    }
}

impl State for ViewControls {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Presentation-only flags of the table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    color_columns: bool,
}

impl TableStyle {
    pub fn color_columns(&self) -> bool {
        self.color_columns
    }

    pub fn toggle_color_columns(&mut self) {
        self.color_columns = !self.color_columns;
    }

    /// Whether the row at `index` of the derived sequence gets a highlighted background.
    pub fn highlights_row(&self, index: usize) -> bool {
        self.color_columns && index % 2 == 0
    }
}

impl State for TableStyle {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
