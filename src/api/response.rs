//! Response bodies that carry message identifiers instead of text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::i18n::{Locale, Message, render_errors};

/// A response payload that can be rendered in any [`Locale`].
///
/// Responses built from it are rendered in the default locale and keep the
/// payload in their extensions, so the locale middleware can render it again
/// for the client's language.
#[derive(Debug, Clone)]
pub enum Localized {
    /// `{"message": "..."}`
    Message(Message),
    /// `{"message": "The given data was invalid.", "errors": {...}}`
    Invalid(ValidationErrors),
}

impl Localized {
    pub fn render(&self, locale: Locale) -> Value {
        match self {
            Localized::Message(message) => json!({ "message": message.text(locale) }),
            Localized::Invalid(errors) => json!({
                "message": Message::InvalidData.text(locale),
                "errors": render_errors(errors, locale),
            }),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        let mut response = (status, Json(self.render(Locale::default()))).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// `200 OK` with a single localized message.
#[derive(Debug, Clone, Copy)]
pub struct MessageResponse(pub Message);

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Localized::Message(self.0).into_response_with(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Rule;

    #[test]
    fn test_render_message() {
        let body = Localized::Message(Message::GroupAdded).render(Locale::En);
        assert_eq!(body, json!({ "message": "Group has been added." }));
    }

    #[test]
    fn test_render_invalid() {
        let mut errors = ValidationErrors::new();
        errors.add("name", Rule::Required.error());

        let body = Localized::Invalid(errors).render(Locale::En);

        assert_eq!(body["message"], "The given data was invalid.");
        assert_eq!(body["errors"]["name"][0], "The name field is required.");
    }

    #[test]
    fn test_response_keeps_payload() {
        let response = MessageResponse(Message::UserDeleted).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.extensions().get::<Localized>().is_some());
    }
}
