//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `validator::Validate` with the field rules of each
//! operation; resource DTOs are the public projections of entities.

pub mod group;
pub mod input;
pub mod user;

pub use group::{GroupRequest, GroupResource};
pub use user::{StoreUserRequest, UpdateUserRequest, UserResource};
