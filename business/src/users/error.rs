use thiserror::Error;

/// Why loading the users failed.
///
/// Both kinds are terminal for the session: nothing retries, the table stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsersError {
    /// Transport error or non-success status.
    #[error("Failed to fetch users: {message}")]
    Fetch { message: String },
    /// The body does not have the expected shape.
    #[error("Failed to parse users response: {message}")]
    Parse { message: String },
}

impl UsersError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
