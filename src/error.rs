//! Application error type and its HTTP representation.
//!
//! Errors carry message identifiers and rule codes, not text. The default
//! body is rendered in English; [`crate::api::middleware::locale`] re-renders
//! it for the client's locale.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use crate::api::response::Localized;
use crate::i18n::{Message, Rule};
use crate::utils::db_error::is_unique_violation_on;

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input broke one or more field rules (422).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No entity at the requested identifier (404).
    #[error("not found: {}", .0.key())]
    NotFound(Message),

    /// Anything the API layer does not classify (500). The detail is logged,
    /// never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation error.
    pub fn invalid(field: &'static str, rule: Rule) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, rule.error());
        AppError::Validation(errors)
    }

    pub fn not_found(message: Message) -> Self {
        AppError::NotFound(message)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let payload = match self {
            AppError::Validation(errors) => Localized::Invalid(errors),
            AppError::NotFound(message) => Localized::Message(message),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                Localized::Message(Message::ServerError)
            }
        };

        payload.into_response_with(status)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on(&e, USERS_EMAIL_KEY) {
            return AppError::invalid("email", Rule::Unique);
        }

        AppError::Internal(format!("database error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid("name", Rule::Required).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::not_found(Message::GroupNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_invalid_carries_field() {
        let AppError::Validation(errors) = AppError::invalid("email", Rule::Unique) else {
            panic!("expected validation error");
        };

        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.keys().any(|f| f.to_string() == "email"));
    }
}
