//! Business logic services for the application layer.

pub mod group_service;
pub mod password;
pub mod user_service;

pub use group_service::GroupService;
pub use user_service::UserService;
