use thiserror::Error;

// PostgreSQL SQLSTATE codes the store reacts to
const UNIQUE_VIOLATION: &str = "23505";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const LOCK_NOT_AVAILABLE: &str = "55P03";
const QUERY_CANCELED: &str = "57014";
const CANNOT_CONNECT_NOW: &str = "57P03";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Lock wait timed out or the transaction lost a conflict; safe to retry
    #[error("store busy: {0}")]
    Busy(String),

    /// The store cannot be reached at all
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Carries the constraint name when the database reports one
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if let Some(mapped) = classify_database_error(&**db_err) {
                return mapped;
            }
        }

        match e {
            sqlx::Error::PoolTimedOut => {
                StoreError::Busy("timed out waiting for a database connection".to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
            other => StoreError::Database(other),
        }
    }
}

fn classify_database_error(db_err: &dyn sqlx::error::DatabaseError) -> Option<StoreError> {
    let code = db_err.code()?;
    match code.as_ref() {
        UNIQUE_VIOLATION => Some(StoreError::UniqueViolation(
            db_err.constraint().unwrap_or("unknown").to_string(),
        )),
        SERIALIZATION_FAILURE | DEADLOCK_DETECTED | LOCK_NOT_AVAILABLE | QUERY_CANCELED => {
            Some(StoreError::Busy(db_err.message().to_string()))
        }
        CANNOT_CONNECT_NOW => Some(StoreError::Unavailable(db_err.message().to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_retryable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_closed_pool_is_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StoreError::from(sqlx::Error::Io(io));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }
}
