//! One-shot load of the user batch.
//!
//! `LoadUsersCommand` performs the request and reports through two channels:
//! the outcome goes to `LoadUsersCompute` (shown in the status line), the
//! users themselves go into `UsersState` as the Snapshot.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use roster_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, Updater, assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::BusinessConfig;
use crate::users::{UsersError, UsersState, fetch_users};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadUsersStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded {
        count: usize,
        fetched_at: DateTime<Utc>,
    },
    Failed(UsersError),
}

impl LoadUsersStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&UsersError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of the load, written only by [`LoadUsersCommand`].
#[derive(Debug, Clone, Default)]
pub struct LoadUsersCompute {
    pub status: LoadUsersStatus,
}

impl LoadUsersCompute {
    fn with_status(status: LoadUsersStatus) -> Self {
        Self { status }
    }
}

impl Compute for LoadUsersCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Command-driven; no derivation.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Fetch the users once and install them as the Snapshot.
///
/// Dispatched by [`crate::users::request_initial_load`], which guarantees it
/// is started at most once per session. Failures are terminal: no retry.
#[derive(Debug, Default)]
pub struct LoadUsersCommand;

impl Command for LoadUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let url = match snap.state::<BusinessConfig>() {
            Ok(config) => config.users_url(),
            Err(err) => {
                error!("LoadUsersCommand: {err}");
                updater.set(LoadUsersCompute::with_status(LoadUsersStatus::Failed(
                    UsersError::fetch(err.to_string()),
                )));
                return Box::pin(async {});
            }
        };

        updater.set(LoadUsersCompute::with_status(LoadUsersStatus::Loading));

        Box::pin(async move {
            info!("LoadUsersCommand: GET {url}");

            let Some(result) = cancel.run_until_cancelled(fetch_users(&url)).await else {
                debug!("LoadUsersCommand: cancelled before the response arrived");
                return;
            };
            if cancel.is_cancelled() {
                debug!("LoadUsersCommand: cancelled, discarding response");
                return;
            }

            match result {
                Ok(users) => {
                    let count = users.len();
                    info!("LoadUsersCommand: loaded {count} users");
                    updater.mutate::<UsersState>(move |state| {
                        if !state.install_snapshot(users) {
                            debug!("LoadUsersCommand: snapshot already installed, ignoring");
                        }
                    });
                    updater.set(LoadUsersCompute::with_status(LoadUsersStatus::Loaded {
                        count,
                        fetched_at: Utc::now(),
                    }));
                }
                Err(err) => {
                    error!("LoadUsersCommand: {err}");
                    updater.set(LoadUsersCompute::with_status(LoadUsersStatus::Failed(err)));
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers() {
        assert!(!LoadUsersStatus::Idle.is_loading());
        assert!(LoadUsersStatus::Loading.is_loading());

        let failed = LoadUsersStatus::Failed(UsersError::parse("bad body"));
        assert_eq!(failed.error().map(UsersError::is_parse), Some(true));
        assert_eq!(LoadUsersStatus::Loading.error(), None);
    }
}
