//! Infrastructure layer for external system integrations.
//!
//! Implements domain repository traits on top of PostgreSQL.

pub mod persistence;
