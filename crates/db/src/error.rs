//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller supplied input that cannot be applied (e.g. an empty patch).
    #[error("{0}")]
    BadRequest(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// HTTP status an upstream web layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
            Self::Sqlx(_) | Self::Migration(_) => 500,
        }
    }
}
