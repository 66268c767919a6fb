//! User entity and the inputs used to create and modify users.

use chrono::{DateTime, Utc};

/// State assigned to every newly created user.
pub const DEFAULT_STATE: &str = "active";

/// A registered user.
///
/// `password_hash` is an Argon2 PHC string. It never leaves the service layer:
/// API projections are built field by field and do not carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub groups: Vec<GroupRef>,
}

impl User {
    /// Returns true if the user belongs to the group with the given id.
    pub fn in_group(&self, group_id: i64) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }
}

/// The slice of a group that a user exposes about its memberships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: i64,
    pub name: String,
}

/// Validated request to create a user, password still in plain text.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub group_id: Option<i64>,
}

/// Row data handed to the repository once the password has been hashed.
///
/// When `group_id` is set the repository inserts the user and the membership
/// row in one transaction.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub group_id: Option<i64>,
}

/// Validated partial update of a user, password still in plain text.
///
/// `last_name: Some(None)` clears the last name; `None` leaves it as is.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<Option<String>>,
    pub email: Option<String>,
    pub state: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.state.is_none()
            && self.password.is_none()
    }
}

/// Column-level patch applied by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<Option<String>>,
    pub email: Option<String>,
    pub state: Option<String>,
    pub password_hash: Option<String>,
}
