//! Repository trait for group management.

use crate::domain::entities::{Group, GroupChanges, NewGroup};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for groups.
///
/// Every returned [`Group`] has its `users` loaded.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgGroupRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Creates a new group with no members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_group: NewGroup) -> Result<Group, AppError>;

    /// Finds a group by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError>;

    /// Lists all groups ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Group>, AppError>;

    /// Applies a partial update and returns the stored group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, changes: GroupChanges) -> Result<Group, AppError>;

    /// Deletes a group and its membership rows. Member users are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
