//! Response localization middleware.

use axum::{
    Json,
    extract::{Request, State},
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::response::Localized;
use crate::i18n::Locale;
use crate::state::AppState;

/// Renders localized response bodies in the client's language.
///
/// The locale is the first supported language in `Accept-Language`, or
/// [`AppState::default_locale`] when none matches. Responses built from a
/// [`Localized`] payload are rendered in English first; their body is
/// replaced here when another locale was negotiated. Other responses pass
/// through untouched.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", api::routes::routes())
///     .layer(middleware::from_fn_with_state(state.clone(), locale::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let header = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = Locale::negotiate(header, st.default_locale);

    let response = next.run(req).await;

    if locale == Locale::default() {
        return response;
    }

    let Some(payload) = response.extensions().get::<Localized>().cloned() else {
        return response;
    };

    tracing::trace!(%locale, "Rendering localized body");

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let body = Json(payload.render(locale)).into_response().into_body();

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::MessageResponse;
    use crate::i18n::Message;
    use crate::test_support::memory_state_with_locale;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(default_locale: Locale) -> Router {
        let state = memory_state_with_locale(default_locale);
        Router::new()
            .route("/message", get(|| async { MessageResponse(Message::UserAdded) }))
            .route("/plain", get(|| async { "plain" }))
            .layer(middleware::from_fn_with_state(state.clone(), layer))
            .with_state(state)
    }

    async fn body_of(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn request(uri: &str, language: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(language) = language {
            builder = builder.header(ACCEPT_LANGUAGE, language);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_english_by_default() {
        let response = app(Locale::En)
            .oneshot(request("/message", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({ "message": "User has been added." }));
    }

    #[tokio::test]
    async fn test_accept_language_selects_locale() {
        let response = app(Locale::En)
            .oneshot(request("/message", Some("ru")))
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({ "message": "Пользователь добавлен." }));
    }

    #[tokio::test]
    async fn test_configured_default_locale() {
        let response = app(Locale::Ru)
            .oneshot(request("/message", Some("de")))
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body["message"], "Пользователь добавлен.");
    }

    #[tokio::test]
    async fn test_other_bodies_untouched() {
        let response = app(Locale::Ru)
            .oneshot(request("/plain", None))
            .await
            .unwrap();

        assert_eq!(body_of(response).await, b"plain");
    }
}
