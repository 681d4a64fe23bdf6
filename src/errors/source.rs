//! Errors raised while querying an external balance source.
//!
//! Any of these aborts the aggregation pass in progress; nothing partial is
//! cached and the next request starts a fresh pass.

/// Errors that can occur while reading balances or total supply.
///
/// # Examples
///
/// ```rust
/// use supplyscan::SourceError;
///
/// let error = SourceError::invalid_response("tokenbalance", "result was \"NOTOK\"");
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached.
    ///
    /// Covers connection failures, timeouts, non-success HTTP statuses and
    /// RPC transport errors.
    #[error("Balance source unavailable during {operation}")]
    SourceUnavailable {
        /// Description of the operation that failed (e.g., "tokenbalance 0xabc…")
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The source answered, but the payload was not the expected integer.
    #[error("Invalid response for {operation}: {details}")]
    InvalidResponse {
        /// Description of the operation that failed
        operation: String,
        /// What was wrong with the payload
        details: String,
    },
}

impl SourceError {
    /// Helper to create a `SourceUnavailable` error from any error type.
    pub fn unavailable(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::SourceUnavailable {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create an `InvalidResponse` error.
    pub fn invalid_response(operation: impl Into<String>, details: impl Into<String>) -> Self {
        SourceError::InvalidResponse {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &str {
        match self {
            SourceError::SourceUnavailable { operation, .. }
            | SourceError::InvalidResponse { operation, .. } => operation,
        }
    }
}
