//! Handlers for user endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::api::dto::{StoreUserRequest, UpdateUserRequest, UserResource};
use crate::api::extract::{IdPath, JsonBody};
use crate::api::response::MessageResponse;
use crate::api::validation;
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;

/// Lists all users with their groups.
///
/// # Endpoint
///
/// `GET /api/users`
pub async fn user_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResource>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResource::from).collect()))
}

/// Creates a user, optionally inside a group.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "first_name": "Alice",
///   "last_name": "Smith",      // optional
///   "email": "alice@example.com",
///   "password": "secret-123",
///   "group_id": 1              // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 422 if any rule fails, including a taken email or unknown group.
pub async fn create_user_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<StoreUserRequest>,
) -> Result<MessageResponse, AppError> {
    let input = validation::store_user(&state, payload).await?;

    state.user_service.create_user(input).await?;

    Ok(MessageResponse(Message::UserAdded))
}

/// Shows one user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn show_user_handler(
    IdPath(id, _): IdPath<UserResource>,
    State(state): State<AppState>,
) -> Result<Json<UserResource>, AppError> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// Partially updates a user.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// Only fields present in the body change. The user is resolved before the
/// body is looked at.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
/// Returns 422 if any rule fails.
pub async fn update_user_handler(
    IdPath(id, _): IdPath<UserResource>,
    State(state): State<AppState>,
    payload: Result<JsonBody<UpdateUserRequest>, AppError>,
) -> Result<MessageResponse, AppError> {
    let user = state.user_service.get_user(id).await?;
    let JsonBody(payload) = payload?;
    let changes = validation::update_user(&state, &user, payload).await?;

    state.user_service.update_user(&user, changes).await?;

    Ok(MessageResponse(Message::UserUpdated))
}

/// Deletes a user and its memberships.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn delete_user_handler(
    IdPath(id, _): IdPath<UserResource>,
    State(state): State<AppState>,
) -> Result<MessageResponse, AppError> {
    let user = state.user_service.get_user(id).await?;

    state.user_service.delete_user(&user).await?;

    Ok(MessageResponse(Message::UserDeleted))
}
