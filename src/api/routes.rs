//! API route configuration.

use crate::api::handlers::{
    create_group_handler, create_user_handler, delete_group_handler, delete_user_handler,
    group_list_handler, show_group_handler, show_user_handler, update_group_handler,
    update_user_handler, user_list_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /groups`       - List groups with their members
/// - `POST   /groups`       - Create a group
/// - `GET    /groups/{id}`  - Show a group
/// - `PUT    /groups/{id}`  - Rename a group
/// - `DELETE /groups/{id}`  - Delete a group (members are kept)
/// - `GET    /users`        - List users with their groups
/// - `POST   /users`        - Create a user, optionally inside a group
/// - `GET    /users/{id}`   - Show a user
/// - `PUT    /users/{id}`   - Partially update a user
/// - `DELETE /users/{id}`   - Delete a user
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(group_list_handler).post(create_group_handler),
        )
        .route(
            "/groups/{id}",
            get(show_group_handler)
                .put(update_group_handler)
                .delete(delete_group_handler),
        )
        .route("/users", get(user_list_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(show_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}
