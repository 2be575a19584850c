use thiserror::Error;

use crate::services::standings::StandingsError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Standings error: {0}")]
    Standings(#[from] StandingsError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Rewrites unique and foreign key failures into a `ConstraintViolation`
    /// carrying a caller-facing message. Other errors pass through untouched.
    pub fn or_constraint(self, unique_msg: &str, foreign_key_msg: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(unique_msg.to_string())
        } else if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(foreign_key_msg.to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_constraint_passes_through_other_errors() {
        let error = StorageError::NotFound.or_constraint("dup", "fk");
        assert!(matches!(error, StorageError::NotFound));
    }

    #[test]
    fn test_plain_errors_are_not_violations() {
        let error = StorageError::Database(sqlx::Error::RowNotFound);
        assert!(!error.is_unique_violation());
        assert!(!error.is_foreign_key_violation());
    }
}
