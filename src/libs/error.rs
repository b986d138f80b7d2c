//! Error taxonomy for the provisioning core.
//!
//! Only failures on the primary target of an operation (an unknown project,
//! preset or category) are hard errors. Uniqueness races are absorbed by the
//! stores and per-row problems are reported inside operation results, so they
//! never show up here.

use crate::libs::category::Tier;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("project {0} does not exist")]
    UnknownProject(i64),

    #[error("preset '{0}' does not exist")]
    UnknownPreset(String),

    #[error("category {0} does not exist")]
    UnknownCategory(i64),

    #[error("a {tier} category named '{name}' already exists in this project")]
    DuplicateCategory { tier: Tier, name: String },

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// True when SQLite rejected a write because of a UNIQUE index.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && (code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || message.as_deref().is_some_and(|value| value.contains("UNIQUE constraint failed")))
        }
        _ => false,
    }
}
