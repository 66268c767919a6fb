//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! by `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`GroupRepository`] - Group CRUD with member references
//! - [`UserRepository`] - User CRUD with group references
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod group_repository;
pub mod user_repository;

pub use group_repository::GroupRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
