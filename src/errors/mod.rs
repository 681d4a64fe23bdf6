//! Error types for the supplyscan library.
//!
//! Follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling: [`SourceError`] for
//!   runtime failures of the external balance source, [`ConfigError`] for
//!   fatal startup problems
//! - **Unified error type** ([`SupplyscanError`]) when the caller does not need
//!   to distinguish between sources
//!
//! A route layer is expected to collapse every runtime error into a single
//! service-unavailable response; the variants exist for logging.
//!
//! # Examples
//!
//! ```rust,ignore
//! use supplyscan::{SupplyscanError, SupplyTracker};
//!
//! async fn circulating(tracker: &SupplyTracker<impl BalanceSource>) -> Result<String, SupplyscanError> {
//!     let supply = tracker.circulating_supply().await?;
//!     Ok(supply.to_string())
//! }
//! ```

mod config;
mod source;

pub use config::ConfigError;
pub use source::SourceError;

/// Unified error type for all supplyscan operations.
///
/// All module-specific error types convert to `SupplyscanError` via `From`,
/// so `?` propagates naturally.
#[derive(Debug, thiserror::Error)]
pub enum SupplyscanError {
    /// Error from the external balance source.
    #[error("Balance source error: {0}")]
    Source(#[from] SourceError),

    /// Error from configuration or registry loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
