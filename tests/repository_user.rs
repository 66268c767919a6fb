mod common;

use sqlx::PgPool;
use std::sync::Arc;
use user_groups::domain::entities::{DEFAULT_STATE, UserPatch};
use user_groups::domain::repositories::UserRepository;
use user_groups::error::AppError;
use user_groups::infrastructure::persistence::PgUserRepository;

fn field_names(err: AppError) -> Vec<String> {
    match err {
        AppError::Validation(errors) => errors
            .field_errors()
            .keys()
            .map(|f| f.to_string())
            .collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_create_user_without_group(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(common::new_user("Alice", "alice@example.com", None))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert_eq!(user.first_name, "Alice");
    assert_eq!(user.state, DEFAULT_STATE);
    assert!(user.groups.is_empty());
}

#[sqlx::test]
async fn test_create_user_in_group(pool: PgPool) {
    let group_id = common::create_test_group(&pool, "Engineers").await;
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    let user = repo
        .create(common::new_user("Alice", "alice@example.com", Some(group_id)))
        .await
        .unwrap();

    assert!(user.in_group(group_id));
    assert_eq!(user.groups[0].name, "Engineers");
    assert_eq!(common::count_memberships(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_user_in_missing_group_rolls_back(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let err = repo
        .create(common::new_user("Alice", "alice@example.com", Some(12_345)))
        .await
        .unwrap_err();

    assert_eq!(field_names(err), vec!["group_id"]);
    assert!(repo.list().await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_duplicate_email_is_validation_error(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(common::new_user("Alice", "alice@example.com", None))
        .await
        .unwrap();

    let err = repo
        .create(common::new_user("Alicia", "alice@example.com", None))
        .await
        .unwrap_err();

    assert_eq!(field_names(err), vec!["email"]);
}

#[sqlx::test]
async fn test_find_by_first_name_returns_lowest_id(pool: PgPool) {
    let first = common::create_test_user(&pool, "Sam", "sam1@example.com").await;
    common::create_test_user(&pool, "Sam", "sam2@example.com").await;

    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.find_by_first_name("Sam").await.unwrap().unwrap();
    assert_eq!(user.id, first);
    assert!(repo.find_by_first_name("Nobody").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_users_loads_groups(pool: PgPool) {
    let ops = common::create_test_group(&pool, "Ops").await;
    let dev = common::create_test_group(&pool, "Dev").await;
    let ann = common::create_test_user(&pool, "Ann", "ann@example.com").await;
    let bob = common::create_test_user(&pool, "Bob", "bob@example.com").await;
    common::add_member(&pool, dev, ann).await;
    common::add_member(&pool, ops, ann).await;

    let repo = PgUserRepository::new(Arc::new(pool));
    let users = repo.list().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, ann);
    let groups: Vec<_> = users[0].groups.iter().map(|g| g.id).collect();
    assert_eq!(groups, vec![ops, dev]);
    assert_eq!(users[1].id, bob);
    assert!(users[1].groups.is_empty());
}

#[sqlx::test]
async fn test_email_exists_excludes_user(pool: PgPool) {
    let ann = common::create_test_user(&pool, "Ann", "ann@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.email_exists("ann@example.com", None).await.unwrap());
    assert!(!repo.email_exists("ann@example.com", Some(ann)).await.unwrap());
    assert!(!repo.email_exists("other@example.com", None).await.unwrap());
}

#[sqlx::test]
async fn test_update_only_supplied_fields(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let created = repo
        .create(common::new_user("Alice", "alice@example.com", None))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UserPatch {
                state: Some("non active".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.state, "non active");
    assert_eq!(updated.first_name, created.first_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.password_hash, created.password_hash);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_update_clears_last_name(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let mut input = common::new_user("Alice", "alice@example.com", None);
    input.last_name = Some("Smith".to_string());
    let created = repo.create(input).await.unwrap();

    let kept = repo
        .update(
            created.id,
            UserPatch {
                first_name: Some("Alicia".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.last_name.as_deref(), Some("Smith"));

    let cleared = repo
        .update(
            created.id,
            UserPatch {
                last_name: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.last_name, None);
}

#[sqlx::test]
async fn test_delete_user_removes_memberships(pool: PgPool) {
    let group_id = common::create_test_group(&pool, "Ops").await;
    let user = common::create_test_user(&pool, "Eve", "eve@example.com").await;
    common::add_member(&pool, group_id, user).await;

    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    repo.delete(user).await.unwrap();

    assert!(repo.find_by_id(user).await.unwrap().is_none());
    assert_eq!(common::count_memberships(&pool).await, 0);
    assert!(matches!(repo.delete(user).await, Err(AppError::NotFound(_))));
}
