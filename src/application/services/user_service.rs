//! User management service.

use std::sync::Arc;

use crate::application::services::group_service::GroupService;
use crate::application::services::password::hash_password;
use crate::domain::entities::{CreateUser, NewUser, User, UserChanges, UserPatch};
use crate::domain::repositories::{GroupRepository, UserRepository};
use crate::error::AppError;
use crate::i18n::{Message, Rule};

/// Service for managing users and their group membership.
///
/// Depends on [`GroupService`] to resolve the group a new user joins.
/// Operations that act on an existing user take it explicitly, as returned by
/// one of the lookups.
pub struct UserService<U: UserRepository + ?Sized, G: GroupRepository + ?Sized> {
    repository: Arc<U>,
    group_service: Arc<GroupService<G>>,
}

impl<U: UserRepository + ?Sized, G: GroupRepository + ?Sized> UserService<U, G> {
    /// Creates a new user service.
    pub fn new(repository: Arc<U>, group_service: Arc<GroupService<G>>) -> Self {
        Self {
            repository,
            group_service,
        }
    }

    /// Lists all users with their groups.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Creates a user, hashing the password first.
    ///
    /// With a `group_id` the group is resolved through [`GroupService`] and the
    /// user is stored together with its membership row in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `group_id` if the group does not exist.
    /// Returns [`AppError::Validation`] on `email` if the address is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn create_user(&self, input: CreateUser) -> Result<User, AppError> {
        let group = match input.group_id {
            Some(id) => Some(
                self.group_service
                    .find_group_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::invalid("group_id", Rule::Exists))?,
            ),
            None => None,
        };

        let password_hash = hash_password(input.password).await?;

        let user = self
            .repository
            .create(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                group_id: group.as_ref().map(|g| g.id),
            })
            .await?;

        tracing::info!(
            user_id = user.id,
            group_id = ?group.map(|g| g.id),
            "User created"
        );

        Ok(user)
    }

    /// Looks a user up by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Looks a user up by ID, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Message::UserNotFound))
    }

    /// Looks up the first user (lowest ID) with the given first name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_user_by_name(&self, first_name: &str) -> Result<Option<User>, AppError> {
        self.repository.find_by_first_name(first_name).await
    }

    /// Returns true if a user other than `except_id` already uses `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        self.repository.email_exists(email, except_id).await
    }

    /// Applies `changes` to `user`. Only supplied fields change; a supplied
    /// password is hashed before it is stored. An empty change set performs
    /// no write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user was deleted meanwhile.
    /// Returns [`AppError::Validation`] on `email` if the address is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn update_user(&self, user: &User, changes: UserChanges) -> Result<User, AppError> {
        if changes.is_empty() {
            return Ok(user.clone());
        }

        let password_hash = match changes.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let patch = UserPatch {
            first_name: changes.first_name,
            last_name: changes.last_name,
            email: changes.email,
            state: changes.state,
            password_hash,
        };

        self.repository.update(user.id, patch).await
    }

    /// Deletes `user` together with its membership rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user was deleted meanwhile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_user(&self, user: &User) -> Result<(), AppError> {
        self.repository.delete(user.id).await?;
        tracing::info!(user_id = user.id, "User deleted");
        Ok(())
    }
}
