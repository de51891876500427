//! Store-specific error types.

/// Errors that can occur while talking to the realtime database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Database answered with a non-success status
    #[error("Database error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to (de)serialize a payload
    #[error("Failed to deserialize database response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Push succeeded but the response carried no generated key
    #[error("Database did not return a key for pushed record at '{path}'")]
    MissingKey { path: String },

    /// Server closed the event stream
    #[error("Event stream closed by server: {0}")]
    StreamClosed(String),

    /// Credentials were revoked mid-stream
    #[error("Authentication revoked for event stream")]
    AuthRevoked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::ApiError {
            status: 401,
            message: "Permission denied".to_string(),
        };
        assert!(error.to_string().contains("401"));
        assert!(error.to_string().contains("Permission denied"));

        let error = StoreError::MissingKey {
            path: "items".to_string(),
        };
        assert!(error.to_string().contains("'items'"));

        let error = StoreError::StreamClosed("Permission denied".to_string());
        assert!(error.to_string().contains("Event stream closed"));

        let error = StoreError::AuthRevoked;
        assert!(error.to_string().contains("revoked"));
    }
}
