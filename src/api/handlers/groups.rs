//! Handlers for group endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::api::dto::{GroupRequest, GroupResource};
use crate::api::extract::{IdPath, JsonBody};
use crate::api::response::MessageResponse;
use crate::api::validation;
use crate::domain::entities::{GroupChanges, NewGroup};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;

/// Lists all groups with their members.
///
/// # Endpoint
///
/// `GET /api/groups`
pub async fn group_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResource>>, AppError> {
    let groups = state.group_service.list_groups().await?;

    Ok(Json(groups.into_iter().map(GroupResource::from).collect()))
}

/// Creates a group.
///
/// # Endpoint
///
/// `POST /api/groups`
///
/// # Errors
///
/// Returns 422 if `name` is missing or longer than 255 characters.
pub async fn create_group_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<GroupRequest>,
) -> Result<MessageResponse, AppError> {
    let name = validation::group_name(payload)?;

    state.group_service.create_group(NewGroup { name }).await?;

    Ok(MessageResponse(Message::GroupAdded))
}

/// Shows one group.
///
/// # Endpoint
///
/// `GET /api/groups/{id}`
///
/// # Errors
///
/// Returns 404 if the group does not exist.
pub async fn show_group_handler(
    IdPath(id, _): IdPath<GroupResource>,
    State(state): State<AppState>,
) -> Result<Json<GroupResource>, AppError> {
    let group = state.group_service.get_group(id).await?;

    Ok(Json(group.into()))
}

/// Renames a group.
///
/// # Endpoint
///
/// `PUT /api/groups/{id}`
///
/// The group is resolved before the body is looked at.
///
/// # Errors
///
/// Returns 404 if the group does not exist.
/// Returns 422 if `name` is missing or longer than 255 characters.
pub async fn update_group_handler(
    IdPath(id, _): IdPath<GroupResource>,
    State(state): State<AppState>,
    payload: Result<JsonBody<GroupRequest>, AppError>,
) -> Result<MessageResponse, AppError> {
    let group = state.group_service.get_group(id).await?;
    let JsonBody(payload) = payload?;
    let name = validation::group_name(payload)?;

    state
        .group_service
        .update_group(&group, GroupChanges { name: Some(name) })
        .await?;

    Ok(MessageResponse(Message::GroupUpdated))
}

/// Deletes a group. Its members are kept.
///
/// # Endpoint
///
/// `DELETE /api/groups/{id}`
///
/// # Errors
///
/// Returns 404 if the group does not exist.
pub async fn delete_group_handler(
    IdPath(id, _): IdPath<GroupResource>,
    State(state): State<AppState>,
) -> Result<MessageResponse, AppError> {
    let group = state.group_service.get_group(id).await?;

    state.group_service.delete_group(&group).await?;

    Ok(MessageResponse(Message::GroupDeleted))
}
