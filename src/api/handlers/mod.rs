//! HTTP request handlers for API endpoints.
//!
//! Each handler module covers the five operations of one resource.

pub mod groups;
pub mod users;

pub use groups::{
    create_group_handler, delete_group_handler, group_list_handler, show_group_handler,
    update_group_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, show_user_handler, update_user_handler,
    user_list_handler,
};
