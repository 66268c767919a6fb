//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single API for every operation.
//!
//! # Available Services
//!
//! - [`services::group_service::GroupService`] - Group CRUD
//! - [`services::user_service::UserService`] - User CRUD, password hashing and
//!   group membership on creation

pub mod services;
