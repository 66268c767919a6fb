//! Helpers for classifying `sqlx` database errors.

/// Returns true if `e` is a unique violation raised by `constraint`.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Returns true if `e` is a foreign key violation.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
