//! Error types for configuration and excluded-address registry loading.
//!
//! These are raised once at startup and are fatal: a tracker is never built
//! from a configuration that failed validation.

/// Errors that can occur while loading configuration or the address registry.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required configuration: {name}")]
    MissingVariable {
        /// Name of the missing variable
        name: String,
    },

    /// A configuration value could not be parsed or is out of range.
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Name of the setting
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A registry entry carries a malformed chain address.
    #[error("Invalid address {address:?}: {reason}")]
    InvalidAddress {
        /// The address as it was supplied
        address: String,
        /// Parser message
        reason: String,
    },

    /// The same address appears twice in the registry.
    #[error("Duplicate excluded address {address}")]
    DuplicateAddress {
        /// The repeated address
        address: String,
    },

    /// A registry entry has an empty label.
    #[error("Excluded address {address} has an empty {field}")]
    EmptyField {
        /// The entry's address
        address: String,
        /// Which field was empty
        field: &'static str,
    },

    /// The registry has no entries.
    #[error("Excluded address registry is empty")]
    EmptyRegistry,

    /// The registry document could not be decoded.
    #[error("Failed to decode excluded address registry")]
    RegistryDecode(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create a `MissingVariable` error.
    pub fn missing(name: impl Into<String>) -> Self {
        ConfigError::MissingVariable { name: name.into() }
    }

    /// Create an `InvalidValue` error.
    pub fn invalid(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
