//! DTOs for user endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{NoneAsEmptyString, serde_as};
use std::collections::BTreeMap;
use validator::Validate;

use crate::api::dto::input::{present_value, trimmed, trimmed_or_none};
use crate::api::validation::{filled, integer};
use crate::domain::entities::User;

/// Body of `POST /api/users`.
///
/// Names and email are trimmed and blank values count as absent. The password
/// is kept verbatim. `group_id` is kept as raw JSON so that a non-integer
/// value is reported as a rule violation rather than a body error.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct StoreUserRequest {
    #[serde(default, deserialize_with = "trimmed_or_none")]
    #[validate(required, length(min = 3, max = 255))]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "trimmed_or_none")]
    #[validate(length(max = 255))]
    pub last_name: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(required, custom(function = "filled"), length(min = 6))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "trimmed_or_none")]
    #[validate(required, email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "present_value")]
    #[validate(custom(function = "integer"))]
    pub group_id: Option<Value>,
}

/// Body of `PUT /api/users/{id}`.
///
/// Every field is optional; a field that is present must have a value.
/// String fields other than the password are trimmed.
/// `last_name: null` clears the last name.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "filled"), length(min = 3, max = 255))]
    pub first_name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 255))]
    pub last_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "filled"), email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "filled"), length(max = 255))]
    pub state: Option<String>,

    #[validate(length(min = 6))]
    pub password: Option<String>,
}

/// Public projection of a user.
///
/// `groups` maps group IDs to names. The password hash never appears here.
#[derive(Debug, Serialize)]
pub struct UserResource {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub state: String,
    pub creation_date: String,
    pub groups: BTreeMap<i64, String>,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            creation_date: user.created_at.date_naive().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            state: user.state,
            groups: user.groups.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }
}
