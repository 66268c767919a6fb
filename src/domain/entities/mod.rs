//! Core domain entities.
//!
//! Entities are plain data structures. Each one comes with separate input
//! types for creation and partial updates:
//!
//! - [`Group`] - created from [`NewGroup`], changed with [`GroupChanges`]
//! - [`User`] - created from [`CreateUser`] (plain password) which the service
//!   turns into [`NewUser`] (hashed); changed with [`UserChanges`] which becomes
//!   a [`UserPatch`]
//!
//! Membership is carried on both sides as lightweight references
//! ([`MemberRef`] on groups, [`GroupRef`] on users).

pub mod group;
pub mod user;

pub use group::{Group, GroupChanges, MemberRef, NewGroup};
pub use user::{CreateUser, DEFAULT_STATE, GroupRef, NewUser, User, UserChanges, UserPatch};
