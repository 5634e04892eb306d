pub mod users;

pub use users::{UsersAction, apply_action, users_panel};
