//! PostgreSQL implementation of the group repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Group, GroupChanges, NewGroup};
use crate::domain::repositories::GroupRepository;
use crate::error::AppError;
use crate::i18n::Message;
use crate::infrastructure::persistence::membership::{GroupRow, load_members_of};

/// PostgreSQL repository for groups.
///
/// Deleting a group relies on `ON DELETE CASCADE` of `group_user` to drop
/// membership rows; the `users` table is never touched.
pub struct PgGroupRepository {
    pool: Arc<PgPool>,
}

impl PgGroupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn with_members(&self, row: GroupRow) -> Result<Group, AppError> {
        let mut members = load_members_of(self.pool.as_ref(), &[row.id]).await?;
        let users = members.remove(&row.id).unwrap_or_default();
        Ok(row.into_group(users))
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn create(&self, new_group: NewGroup) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(new_group.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into_group(Vec::new()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>("SELECT id, name FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => Ok(Some(self.with_members(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Group>, AppError> {
        let rows = sqlx::query_as::<_, GroupRow>("SELECT id, name FROM groups ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut members = load_members_of(self.pool.as_ref(), &ids).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let users = members.remove(&r.id).unwrap_or_default();
                r.into_group(users)
            })
            .collect())
    }

    async fn update(&self, id: i64, changes: GroupChanges) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            UPDATE groups SET
                name = COALESCE($2::TEXT, name)
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found(Message::GroupNotFound))?;

        self.with_members(row).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(Message::GroupNotFound));
        }

        Ok(())
    }
}
