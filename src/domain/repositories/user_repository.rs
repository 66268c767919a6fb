//! Repository trait for user management.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users.
///
/// Every returned [`User`] has its `groups` loaded.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, and its membership row when `new_user.group_id` is set,
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `email` if the address is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds the user with the lowest ID whose first name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_first_name(&self, first_name: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Returns true if another user already uses `email`.
    ///
    /// `except_id` excludes one user from the check (the one being updated).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn email_exists(&self, email: &str, except_id: Option<i64>) -> Result<bool, AppError>;

    /// Applies a column patch, bumps `updated_at` and returns the stored user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Validation`] on `email` if the address is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    /// Deletes a user and its membership rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
