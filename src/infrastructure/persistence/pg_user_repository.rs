//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::i18n::{Message, Rule};
use crate::infrastructure::persistence::membership::{USER_COLUMNS, UserRow, load_groups_of};
use crate::utils::db_error::is_foreign_key_violation;

/// PostgreSQL repository for users.
///
/// Creation with a group runs in a transaction: the user row and the
/// `group_user` row are committed together or not at all.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn with_groups(&self, row: UserRow) -> Result<User, AppError> {
        let mut groups = load_groups_of(self.pool.as_ref(), &[row.id]).await?;
        let user_groups = groups.remove(&row.id).unwrap_or_default();
        Ok(row.into_user(user_groups))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let groups = match new_user.group_id {
            Some(group_id) => {
                sqlx::query("INSERT INTO group_user (group_id, user_id) VALUES ($1, $2)")
                    .bind(group_id)
                    .bind(row.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        if is_foreign_key_violation(&e) {
                            AppError::invalid("group_id", Rule::Exists)
                        } else {
                            AppError::from(e)
                        }
                    })?;

                load_groups_of(&mut *tx, &[row.id])
                    .await?
                    .remove(&row.id)
                    .unwrap_or_default()
            }
            None => Vec::new(),
        };

        tx.commit().await?;

        Ok(row.into_user(groups))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.with_groups(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE first_name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(first_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.with_groups(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut groups = load_groups_of(self.pool.as_ref(), &ids).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let user_groups = groups.remove(&r.id).unwrap_or_default();
                r.into_user(user_groups)
            })
            .collect())
    }

    async fn email_exists(&self, email: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users
                WHERE email = $1
                  AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(except_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let update_last_name = patch.last_name.is_some();
        let new_last_name = patch.last_name.flatten();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                first_name = COALESCE($2::TEXT, first_name),
                last_name  = CASE WHEN $3 THEN $4::TEXT ELSE last_name END,
                email      = COALESCE($5::TEXT, email),
                state      = COALESCE($6::TEXT, state),
                password   = COALESCE($7::TEXT, password),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.first_name)
        .bind(update_last_name)
        .bind(new_last_name)
        .bind(patch.email)
        .bind(patch.state)
        .bind(patch.password_hash)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found(Message::UserNotFound))?;

        self.with_groups(row).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(Message::UserNotFound));
        }

        Ok(())
    }
}
