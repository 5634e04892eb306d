//! The users table: loading, the Snapshot/WorkingSet pair, view controls and
//! the derived rows.

mod actions;
mod api;
mod derive;
mod error;
mod load;
mod model;
mod state;

pub use actions::{
    delete_user, register, request_initial_load, reset_to_snapshot, set_filter_country,
    toggle_color_columns, toggle_sort_by_country,
};
pub use api::fetch_users;
pub use derive::{
    DeriveKey, DerivedUsersCompute, compare_countries, derive_users, matches_country_filter,
};
pub use error::UsersError;
pub use load::{LoadUsersCommand, LoadUsersCompute, LoadUsersStatus};
pub use model::{RandomUser, RandomUserResponse, ResponseInfo, UserEntity};
pub use state::{TableStyle, UsersState, ViewControls};
