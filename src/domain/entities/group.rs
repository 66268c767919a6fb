//! Group entity and its membership projection.

/// A named collection of users.
///
/// `users` holds the members loaded alongside the group; repositories always
/// fill it so callers never trigger a second lookup per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub users: Vec<MemberRef>,
}

impl Group {
    pub fn new(id: i64, name: String, users: Vec<MemberRef>) -> Self {
        Self { id, name, users }
    }

    /// Returns true if a user with the given id belongs to the group.
    pub fn has_member(&self, user_id: i64) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }
}

/// The slice of a user that a group exposes about its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub id: i64,
    pub first_name: String,
}

/// Input data for creating a new group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
}

/// Partial update of a group. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct GroupChanges {
    pub name: Option<String>,
}

impl GroupChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
