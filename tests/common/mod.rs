#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use user_groups::domain::entities::NewUser;
use user_groups::i18n::Locale;
use user_groups::state::AppState;

pub async fn create_test_group(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO groups (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_user(pool: &PgPool, first_name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (first_name, email, password) VALUES ($1, $2, 'not-a-hash') RETURNING id",
    )
    .bind(first_name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_member(pool: &PgPool, group_id: i64, user_id: i64) {
    sqlx::query("INSERT INTO group_user (group_id, user_id) VALUES ($1, $2)")
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_memberships(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM group_user")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn new_user(first_name: &str, email: &str, group_id: Option<i64>) -> NewUser {
    NewUser {
        first_name: first_name.to_string(),
        last_name: None,
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        group_id,
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::from_pool(Arc::new(pool), Locale::En)
}
