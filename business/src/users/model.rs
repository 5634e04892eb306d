//! User records as shown in the table, and the randomuser.me wire format they come from.

use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// One randomly generated person.
///
/// `id` is interned because rows are keyed, compared and deleted by it on every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    pub id: Ustr,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub picture_url: String,
}

impl UserEntity {
    pub fn new(
        id: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country: impl Into<String>,
        picture_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Ustr::from(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            country: country.into(),
            picture_url: picture_url.into(),
        }
    }
}

/// Body of `GET /api/?results=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUser>,
    #[serde(default)]
    pub info: Option<ResponseInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub seed: Option<String>,
}

/// A single record of the `results` array. Fields the table does not show are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomUser {
    pub login: Login,
    pub name: Name,
    pub location: Location,
    pub picture: Picture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub large: String,
}

impl From<RandomUser> for UserEntity {
    fn from(user: RandomUser) -> Self {
        Self {
            id: Ustr::from(&user.login.uuid),
            first_name: user.name.first,
            last_name: user.name.last,
            country: user.location.country,
            picture_url: user.picture.large,
        }
    }
}
