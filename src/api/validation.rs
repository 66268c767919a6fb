//! Rule sets for request bodies.
//!
//! Field rules are declared on the request DTOs with `validator`. The rules
//! that need the store (unique email, existing group) run here afterwards and
//! their failures are merged into the same error set, so a client gets every
//! problem in one 422 response. Nothing is written before all rules pass.

use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::dto::{GroupRequest, StoreUserRequest, UpdateUserRequest};
use crate::domain::entities::{CreateUser, User, UserChanges};
use crate::error::AppError;
use crate::i18n::Rule;
use crate::state::AppState;

/// A present field must not be blank.
pub fn filled(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(Rule::Filled.error());
    }
    Ok(())
}

/// Accepts JSON integers and strings holding one.
pub fn integer(value: &Value) -> Result<(), ValidationError> {
    match as_integer(value) {
        Some(_) => Ok(()),
        None => Err(Rule::Integer.error()),
    }
}

pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_rules(req: &impl Validate) -> ValidationErrors {
    req.validate().err().unwrap_or_else(ValidationErrors::new)
}

fn has_error(errors: &ValidationErrors, field: &str) -> bool {
    errors.errors().contains_key(field)
}

/// Validates a group body and returns the group name.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `name` is missing, empty or too long.
pub fn group_name(req: GroupRequest) -> Result<String, AppError> {
    req.validate()?;
    req.name
        .ok_or_else(|| AppError::invalid("name", Rule::Required))
}

/// Validates a user creation body.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with every failed rule.
/// Returns [`AppError::Internal`] if a store-backed rule cannot be checked.
pub async fn store_user(state: &AppState, req: StoreUserRequest) -> Result<CreateUser, AppError> {
    let mut errors = field_rules(&req);

    if let Some(email) = req.email.as_deref()
        && !has_error(&errors, "email")
        && state.user_service.email_taken(email, None).await?
    {
        errors.add("email", Rule::Unique.error());
    }

    let group_id = req.group_id.as_ref().and_then(as_integer);
    if let Some(id) = group_id
        && state.group_service.find_group_by_id(id).await?.is_none()
    {
        errors.add("group_id", Rule::Exists.error());
    }

    let (Some(first_name), Some(email), Some(password)) =
        (req.first_name, req.email, req.password)
    else {
        return Err(AppError::Validation(errors));
    };

    if !errors.errors().is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(CreateUser {
        first_name,
        last_name: req.last_name,
        email,
        password,
        group_id,
    })
}

/// Validates a user update body against the user being updated.
///
/// The unique email rule ignores `user` itself, so resubmitting the current
/// address is allowed. An empty `last_name` clears it.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with every failed rule.
/// Returns [`AppError::Internal`] if a store-backed rule cannot be checked.
pub async fn update_user(
    state: &AppState,
    user: &User,
    req: UpdateUserRequest,
) -> Result<UserChanges, AppError> {
    let mut errors = field_rules(&req);

    if let Some(email) = req.email.as_deref()
        && !has_error(&errors, "email")
        && state.user_service.email_taken(email, Some(user.id)).await?
    {
        errors.add("email", Rule::Unique.error());
    }

    if !errors.errors().is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(UserChanges {
        first_name: req.first_name,
        last_name: req
            .last_name
            .map(|name| name.filter(|n| !n.is_empty())),
        email: req.email,
        state: req.state,
        password: req.password,
    })
}
