//! Business logic of the roster app: the users API client and the states,
//! computes and commands behind the users table.

mod config;
pub mod http;
pub mod users;

pub use config::{BusinessConfig, DEFAULT_API_BASE_URL, DEFAULT_RESULTS};
pub use users::{UserEntity, UsersError};
