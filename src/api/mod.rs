//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies and resource projections
//! - [`extract`] - JSON body extractor reporting 422 field errors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Localization and tracing middleware
//! - [`response`] - Localized response payloads
//! - [`routes`] - Route configuration
//! - [`validation`] - Rule sets run before any write

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod validation;
