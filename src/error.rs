use sea_orm::{DbErr, SqlErr};

use crate::tx::TxError;

/// Outcome of a failed attempt to create or read customers
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Invalid name '{0}': customer names should only contain letters & '-'")]
    InvalidName(String),
    #[error("Customer '{0}' already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Transaction(#[from] TxError),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CustomerError {
    /// Translate a write failure for `name`, turning a unique-constraint
    /// violation into [`CustomerError::AlreadyExists`]
    pub fn from_write(err: DbErr, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(name, detail = %detail, "Unique constraint violated");
                CustomerError::AlreadyExists(name.to_string())
            }
            _ => CustomerError::Database(err),
        }
    }
}
