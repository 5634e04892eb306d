//! The one outbound read: `GET {base}/api/?results=N`.

use std::collections::HashSet;

use log::{info, warn};

use crate::http::Client;
use crate::users::{RandomUserResponse, UserEntity, UsersError};

/// Fetch and parse a batch of random users.
pub async fn fetch_users(url: &str) -> Result<Vec<UserEntity>, UsersError> {
    let response = Client::get(url)
        .send()
        .await
        .map_err(|e| UsersError::fetch(e.message))?;

    if !response.is_success() {
        return Err(UsersError::fetch(format!(
            "API returned status: {}",
            response.status
        )));
    }

    let body: RandomUserResponse = response
        .json()
        .map_err(|e| UsersError::parse(e.to_string()))?;

    if let Some(seed) = body.info.as_ref().and_then(|info| info.seed.as_deref()) {
        info!("Fetched {} users (seed {seed})", body.results.len());
    }

    let users: Vec<UserEntity> = body.results.into_iter().map(UserEntity::from).collect();
    warn_on_duplicate_ids(&users);
    Ok(users)
}

fn warn_on_duplicate_ids(users: &[UserEntity]) {
    let mut seen = HashSet::new();
    for user in users {
        if !seen.insert(user.id) {
            warn!("Duplicate user id in batch: {}", user.id);
        }
    }
}
