//! Repository error taxonomy and Postgres constraint classification.

use thiserror::Error;

/// SQLSTATE raised when a UNIQUE or PRIMARY KEY constraint rejects a row.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised when a REFERENCES constraint rejects a row.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors returned by catalog repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// The target row (or a row it references) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input was rejected before reaching the store.
    #[error("{0}")]
    Validation(String),

    /// Any other store failure, passed through unmodified.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// The constraint violations the repository knows how to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Carries the constraint name when the server reported one.
    Unique(Option<String>),
    ForeignKey,
}

/// Classifies a store error by SQLSTATE. Returns `None` for anything unrecognized.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_err = err.as_database_error()?;
    let code = db_err.code();
    classify_violation(code.as_deref(), db_err.constraint())
}

pub(crate) fn classify_violation(
    code: Option<&str>,
    constraint: Option<&str>,
) -> Option<ConstraintViolation> {
    match code? {
        UNIQUE_VIOLATION => Some(ConstraintViolation::Unique(constraint.map(str::to_string))),
        FOREIGN_KEY_VIOLATION => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}
