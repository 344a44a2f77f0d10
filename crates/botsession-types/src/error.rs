use thiserror::Error;

/// Marker substring backends put in the message of a duplicate-create error.
pub const ALREADY_EXISTS: &str = "already exists";

/// Errors from document store operations (used by trait definitions in botsession-core).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("schema error: {0}")]
    Schema(String),
}

impl StoreError {
    /// The human-readable message carried by the error, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(msg) | Self::Query(msg) | Self::Schema(msg) => msg,
        }
    }

    /// Whether the backend rejected a create because the target already exists.
    pub fn is_already_exists(&self) -> bool {
        self.message().contains(ALREADY_EXISTS)
    }
}

/// Errors raised by the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    #[error("schema provisioning failed: {0}")]
    Provisioning(StoreError),

    #[error("invalid session configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("no such table: test___telegraf_sessions".to_string());
        assert_eq!(
            err.to_string(),
            "query error: no such table: test___telegraf_sessions"
        );
    }

    #[test]
    fn test_already_exists_matches_message_substring() {
        let err = StoreError::Schema("Database `test` already exists.".to_string());
        assert!(err.is_already_exists());

        let err = StoreError::Schema("Database `test` does not exist.".to_string());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_already_exists_ignores_variant() {
        // Only the message matters, whichever variant the backend picked.
        let err = StoreError::Query("table \"test__s\" already exists".to_string());
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_session_error_from_store_error() {
        let err: SessionError = StoreError::Connection("refused".to_string()).into();
        assert!(matches!(err, SessionError::Store(StoreError::Connection(_))));
        assert!(err.to_string().contains("refused"));
    }
}
