//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgGroupRepository`] - Group storage with member loading
//! - [`PgUserRepository`] - User storage, transactional creation with membership

mod membership;
pub mod pg_group_repository;
pub mod pg_user_repository;

pub use pg_group_repository::PgGroupRepository;
pub use pg_user_repository::PgUserRepository;
