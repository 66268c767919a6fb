//! Group management service.

use crate::domain::entities::{Group, GroupChanges, NewGroup};
use crate::domain::repositories::GroupRepository;
use crate::error::AppError;
use crate::i18n::Message;
use std::sync::Arc;

/// Service for managing groups.
///
/// Operations that act on an existing group take it explicitly, as returned
/// by [`GroupService::find_group_by_id`].
pub struct GroupService<R: GroupRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: GroupRepository + ?Sized> GroupService<R> {
    /// Creates a new group service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists all groups with their members.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        self.repository.list().await
    }

    /// Persists a new group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_group(&self, new_group: NewGroup) -> Result<Group, AppError> {
        let group = self.repository.create(new_group).await?;
        tracing::info!(group_id = group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Looks a group up by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_group_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Looks a group up by ID, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_group(&self, id: i64) -> Result<Group, AppError> {
        self.find_group_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Message::GroupNotFound))
    }

    /// Applies `changes` to `group`. An empty change set performs no write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group was deleted meanwhile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_group(
        &self,
        group: &Group,
        changes: GroupChanges,
    ) -> Result<Group, AppError> {
        if changes.is_empty() {
            return Ok(group.clone());
        }

        self.repository.update(group.id, changes).await
    }

    /// Deletes `group`. Its members stay, only their membership rows go.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group was deleted meanwhile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_group(&self, group: &Group) -> Result<(), AppError> {
        self.repository.delete(group.id).await?;
        tracing::info!(
            group_id = group.id,
            members = group.users.len(),
            "Group deleted"
        );
        Ok(())
    }
}
