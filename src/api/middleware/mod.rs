//! HTTP middleware for request processing.
//!
//! Provides response localization and observability middleware.

pub mod locale;
pub mod tracing;
