//! Message identifiers and their per-locale text.
//!
//! Core logic only ever deals with [`Message`] identifiers and validation rule
//! codes ([`Rule`]). Text is produced at the response boundary by
//! [`crate::api::middleware::locale`], which picks a [`Locale`] from the
//! `Accept-Language` header.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use validator::{ValidationError, ValidationErrors};

/// Locales with a message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Picks the first supported language listed in an `Accept-Language`
    /// header value, falling back to `fallback`.
    ///
    /// Quality weights are ignored; clients list languages in preference order.
    pub fn negotiate(header: Option<&str>, fallback: Locale) -> Locale {
        header
            .into_iter()
            .flat_map(|h| h.split(','))
            .filter_map(|tag| {
                let tag = tag.split(';').next()?.trim();
                let primary = tag.split('-').next()?;
                primary.parse().ok()
            })
            .next()
            .unwrap_or(fallback)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Fixed set of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    GroupAdded,
    GroupUpdated,
    GroupDeleted,
    GroupNotFound,
    UserAdded,
    UserUpdated,
    UserDeleted,
    UserNotFound,
    InvalidData,
    ServerError,
}

impl Message {
    /// Stable identifier of the message, independent of locale.
    pub fn key(self) -> &'static str {
        match self {
            Message::GroupAdded => "group.add",
            Message::GroupUpdated => "group.update",
            Message::GroupDeleted => "group.delete",
            Message::GroupNotFound => "group.not_founded",
            Message::UserAdded => "user.add",
            Message::UserUpdated => "user.update",
            Message::UserDeleted => "user.delete",
            Message::UserNotFound => "user.not_founded",
            Message::InvalidData => "validation.invalid",
            Message::ServerError => "server.error",
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Message::GroupAdded => "Group has been added.",
                Message::GroupUpdated => "Group has been updated.",
                Message::GroupDeleted => "Group has been deleted.",
                Message::GroupNotFound => "Group not founded.",
                Message::UserAdded => "User has been added.",
                Message::UserUpdated => "User has been updated.",
                Message::UserDeleted => "User has been deleted.",
                Message::UserNotFound => "User not founded.",
                Message::InvalidData => "The given data was invalid.",
                Message::ServerError => "Server error.",
            },
            Locale::Ru => match self {
                Message::GroupAdded => "Группа добавлена.",
                Message::GroupUpdated => "Группа обновлена.",
                Message::GroupDeleted => "Группа удалена.",
                Message::GroupNotFound => "Группа не найдена.",
                Message::UserAdded => "Пользователь добавлен.",
                Message::UserUpdated => "Пользователь обновлён.",
                Message::UserDeleted => "Пользователь удалён.",
                Message::UserNotFound => "Пользователь не найден.",
                Message::InvalidData => "Переданные данные некорректны.",
                Message::ServerError => "Ошибка сервера.",
            },
        }
    }
}

/// Validation rules, identified on [`ValidationError`]s by their code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Filled,
    Length,
    Email,
    Unique,
    Integer,
    Exists,
    Json,
}

impl Rule {
    pub fn code(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Filled => "filled",
            Rule::Length => "length",
            Rule::Email => "email",
            Rule::Unique => "unique",
            Rule::Integer => "integer",
            Rule::Exists => "exists",
            Rule::Json => "json",
        }
    }

    pub fn from_code(code: &str) -> Option<Rule> {
        [
            Rule::Required,
            Rule::Filled,
            Rule::Length,
            Rule::Email,
            Rule::Unique,
            Rule::Integer,
            Rule::Exists,
            Rule::Json,
        ]
        .into_iter()
        .find(|r| r.code() == code)
    }

    /// Builds a bare error carrying this rule's code.
    pub fn error(self) -> ValidationError {
        ValidationError::new(self.code())
    }
}

/// Renders every field error as human-readable text, fields sorted by name.
pub fn render_errors(errors: &ValidationErrors, locale: Locale) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let lines = errs.iter().map(|e| describe(&field, e, locale)).collect();
            (field, lines)
        })
        .collect()
}

/// Renders one field error.
pub fn describe(field: &str, error: &ValidationError, locale: Locale) -> String {
    let attr = field.replace('_', " ");
    let template = match Rule::from_code(&error.code) {
        Some(Rule::Length) => length_template(&error.params, locale),
        Some(rule) => rule_template(rule, locale),
        None => match locale {
            Locale::En => "The {attr} is invalid.",
            Locale::Ru => "Поле {attr} некорректно.",
        },
    };

    let mut text = template.replace("{attr}", &attr);
    for key in ["min", "max"] {
        if let Some(v) = error.params.get(key) {
            text = text.replace(&format!("{{{key}}}"), &v.to_string());
        }
    }
    text
}

fn rule_template(rule: Rule, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match rule {
            Rule::Required => "The {attr} field is required.",
            Rule::Filled => "The {attr} field must have a value.",
            Rule::Length => "The {attr} has an invalid length.",
            Rule::Email => "The {attr} must be a valid email address.",
            Rule::Unique => "The {attr} has already been taken.",
            Rule::Integer => "The {attr} must be an integer.",
            Rule::Exists => "The selected {attr} is invalid.",
            Rule::Json => "The {attr} must be a valid JSON object.",
        },
        Locale::Ru => match rule {
            Rule::Required => "Поле {attr} обязательно для заполнения.",
            Rule::Filled => "Поле {attr} должно иметь значение.",
            Rule::Length => "Поле {attr} имеет недопустимую длину.",
            Rule::Email => "Поле {attr} должно быть действительным электронным адресом.",
            Rule::Unique => "Такое значение поля {attr} уже существует.",
            Rule::Integer => "Поле {attr} должно быть целым числом.",
            Rule::Exists => "Выбранное значение для {attr} некорректно.",
            Rule::Json => "Поле {attr} должно быть корректным JSON-объектом.",
        },
    }
}

/// `validator` reports both bounds of a length rule; the offending one is
/// recovered from the rejected value.
fn length_template(params: &HashMap<Cow<'static, str>, Value>, locale: Locale) -> &'static str {
    let len = params
        .get("value")
        .and_then(Value::as_str)
        .map(|s| s.chars().count() as u64);
    let min = params.get("min").and_then(Value::as_u64);
    let max = params.get("max").and_then(Value::as_u64);

    let too_short = match (len, min) {
        (Some(len), Some(min)) => len < min,
        (None, Some(_)) => max.is_none(),
        _ => false,
    };

    match (locale, too_short) {
        (Locale::En, true) => "The {attr} must be at least {min} characters.",
        (Locale::En, false) => "The {attr} may not be greater than {max} characters.",
        (Locale::Ru, true) => "Количество символов в поле {attr} должно быть не меньше {min}.",
        (Locale::Ru, false) => "Количество символов в поле {attr} не может превышать {max}.",
    }
}
