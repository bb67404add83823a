//! Error types for the Aave API client.

use thiserror::Error;

/// Errors that can occur when using the Aave API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// The server answered with an HTTP error status.
    #[error("Server returned HTTP {0}")]
    Server(u16),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Plan execution failed.
    #[error(transparent)]
    Execution(#[from] aave_rs_exec::ExecutionError),

    /// Transaction support is not configured (no signing adapter).
    #[error("Transaction support not configured: provide a signing adapter")]
    TransactionNotConfigured,

    /// Invalid address format.
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_error_display_graphql() {
        let error = ApiError::GraphQL("market not found".to_string());
        assert_eq!(error.to_string(), "GraphQL error: market not found");
    }

    #[test]
    fn test_execution_error_passes_through_unchanged() {
        let error = ApiError::from(aave_rs_exec::ExecutionError::Validation {
            required: U256::from(100),
            available: U256::from(40),
        });
        assert_eq!(
            error.to_string(),
            "insufficient balance: required 100, available 40"
        );
    }

    #[test]
    fn test_error_display_not_configured() {
        let error = ApiError::TransactionNotConfigured;
        assert!(error.to_string().contains("signing adapter"));
    }
}
