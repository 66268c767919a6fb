//! Request body and path extraction.

use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::api::dto::{GroupResource, UserResource};
use crate::error::AppError;
use crate::i18n::{Message, Rule};

/// JSON body extractor that reports problems as field errors.
///
/// An empty body is read as `{}` so that missing input surfaces through the
/// field rules. Anything that is not the expected JSON shape becomes a `body`
/// validation error (422) instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            AppError::invalid("body", Rule::Json)
        })?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw).map(JsonBody).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::invalid("body", Rule::Json)
        })
    }
}

/// A resource addressed by `/{id}` in the API.
pub trait Addressable {
    /// Message returned when the id does not name a stored entity.
    const NOT_FOUND: Message;
}

impl Addressable for GroupResource {
    const NOT_FOUND: Message = Message::GroupNotFound;
}

impl Addressable for UserResource {
    const NOT_FOUND: Message = Message::UserNotFound;
}

/// Path id extractor.
///
/// An id that is not a 64-bit integer cannot name a stored entity, so it is
/// answered with the resource's 404 instead of axum's plain-text 400.
#[derive(Debug)]
pub struct IdPath<R>(pub i64, pub PhantomData<R>);

impl<S, R> FromRequestParts<S> for IdPath<R>
where
    R: Addressable,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected path id");
                AppError::not_found(R::NOT_FOUND)
            })?;

        Ok(IdPath(id, PhantomData))
    }
}
