//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes a plain-text password with Argon2id and a random salt.
///
/// Runs on the blocking pool.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
#[tracing::instrument(name = "password::hash", skip(password))]
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
}
