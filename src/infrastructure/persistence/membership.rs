//! Row types and batched membership loaders shared by the repositories.
//!
//! Associations are fetched with one `ANY($1)` join per listing instead of one
//! query per entity.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use std::collections::HashMap;

use crate::domain::entities::{Group, GroupRef, MemberRef, User};

pub(crate) const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password, state, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self, groups: Vec<GroupRef>) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            groups,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct GroupRow {
    pub id: i64,
    pub name: String,
}

impl GroupRow {
    pub fn into_group(self, users: Vec<MemberRef>) -> Group {
        Group::new(self.id, self.name, users)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserGroupRow {
    user_id: i64,
    group_id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct GroupMemberRow {
    group_id: i64,
    user_id: i64,
    first_name: String,
}

/// Loads the groups of every user in `user_ids`, keyed by user ID.
pub(crate) async fn load_groups_of<'e, E>(
    executor: E,
    user_ids: &[i64],
) -> Result<HashMap<i64, Vec<GroupRef>>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, UserGroupRow>(
        r#"
        SELECT gu.user_id, g.id AS group_id, g.name
        FROM group_user gu
        JOIN groups g ON g.id = gu.group_id
        WHERE gu.user_id = ANY($1)
        ORDER BY g.id
        "#,
    )
    .bind(user_ids)
    .fetch_all(executor)
    .await?;

    let mut by_user: HashMap<i64, Vec<GroupRef>> = HashMap::new();
    for row in rows {
        by_user.entry(row.user_id).or_default().push(GroupRef {
            id: row.group_id,
            name: row.name,
        });
    }

    Ok(by_user)
}

/// Loads the members of every group in `group_ids`, keyed by group ID.
pub(crate) async fn load_members_of<'e, E>(
    executor: E,
    group_ids: &[i64],
) -> Result<HashMap<i64, Vec<MemberRef>>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if group_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, GroupMemberRow>(
        r#"
        SELECT gu.group_id, u.id AS user_id, u.first_name
        FROM group_user gu
        JOIN users u ON u.id = gu.user_id
        WHERE gu.group_id = ANY($1)
        ORDER BY u.id
        "#,
    )
    .bind(group_ids)
    .fetch_all(executor)
    .await?;

    let mut by_group: HashMap<i64, Vec<MemberRef>> = HashMap::new();
    for row in rows {
        by_group.entry(row.group_id).or_default().push(MemberRef {
            id: row.user_id,
            first_name: row.first_name,
        });
    }

    Ok(by_group)
}
