// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Registry of excluded (non-circulating) addresses
//!
//! The registry is loaded once at startup and never mutated afterwards.
//! Validation happens at load time, so a malformed entry is a fatal
//! [`ConfigError`] rather than something discovered mid-aggregation.
//!
//! # Example
//!
//! ```rust
//! use supplyscan::AddressRegistry;
//!
//! let registry = AddressRegistry::from_entries(&[
//!     ("0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11", "BSC", "Vesting", "IDO Round"),
//!     ("0x7292d76f371dF773d5BAeAe038b4281fF3f33215", "BSC", "Airdrops", "Airdrop Round"),
//! ])?;
//! assert_eq!(registry.len(), 2);
//! # Ok::<(), supplyscan::ConfigError>(())
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::constants::DEFAULT_EXCLUDED_ADDRESSES;
use crate::errors::ConfigError;

/// A wallet whose balance does not count towards circulating supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedAddress {
    /// Holder address
    pub address: Address,
    /// Chain label, e.g. "BSC"
    pub chain: String,
    /// Why the wallet is excluded, e.g. "TeamFinance Vesting"
    pub category: String,
    /// Human-readable wallet description
    pub description: String,
}

impl ExcludedAddress {
    /// Parse and validate a single record
    pub fn parse(
        address: &str,
        chain: &str,
        category: &str,
        description: &str,
    ) -> Result<Self, ConfigError> {
        let parsed = address
            .trim()
            .parse::<Address>()
            .map_err(|e| ConfigError::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        let record = Self {
            address: parsed,
            chain: chain.trim().to_string(),
            category: category.trim().to_string(),
            description: description.trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let empty = |field: &'static str| ConfigError::EmptyField {
            address: self.address.to_string(),
            field,
        };

        if self.chain.trim().is_empty() {
            return Err(empty("chain"));
        }
        if self.category.trim().is_empty() {
            return Err(empty("category"));
        }
        if self.description.trim().is_empty() {
            return Err(empty("description"));
        }
        Ok(())
    }

    /// Link to this holder's position in `token` on a block explorer
    ///
    /// Produces `{explorer}/token/{token}?a={address}`, keeping any path
    /// prefix on `explorer`.
    pub fn explorer_url(&self, explorer: &Url, token: Address) -> Url {
        let mut url = explorer.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("token")
                .push(&token.to_string());
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("a", &self.address.to_string());
        url
    }
}

/// Ordered, immutable list of excluded addresses
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone)]
pub struct AddressRegistry {
    entries: Arc<[ExcludedAddress]>,
}

impl AddressRegistry {
    /// Build a registry from already-parsed records
    ///
    /// Rejects an empty list, duplicate addresses and empty labels.
    pub fn new(entries: Vec<ExcludedAddress>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.address) {
                return Err(ConfigError::DuplicateAddress {
                    address: entry.address.to_string(),
                });
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Build a registry from `(address, chain, category, description)` tuples
    pub fn from_entries(entries: &[(&str, &str, &str, &str)]) -> Result<Self, ConfigError> {
        let records = entries
            .iter()
            .map(|(address, chain, category, description)| {
                ExcludedAddress::parse(address, chain, category, description)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Build a registry from a JSON array of records
    ///
    /// ```rust
    /// use supplyscan::AddressRegistry;
    ///
    /// let json = r#"[{
    ///     "address": "0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11",
    ///     "chain": "BSC",
    ///     "category": "ChainGPT Pad IDO Vesting",
    ///     "description": "IDO Round"
    /// }]"#;
    /// let registry = AddressRegistry::from_json_str(json)?;
    /// assert_eq!(registry.len(), 1);
    /// # Ok::<(), supplyscan::ConfigError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let records: Vec<ExcludedAddress> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The excluded wallets of the deployed BSC tracker
    pub fn default_bsc() -> Result<Self, ConfigError> {
        Self::from_entries(DEFAULT_EXCLUDED_ADDRESSES)
    }

    /// Records in load order
    pub fn entries(&self) -> &[ExcludedAddress] {
        &self.entries
    }

    /// Iterate records in load order
    pub fn iter(&self) -> std::slice::Iter<'_, ExcludedAddress> {
        self.entries.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AddressRegistry {
    type Item = &'a ExcludedAddress;
    type IntoIter = std::slice::Iter<'a, ExcludedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_default_registry_loads_in_order() {
        let registry = AddressRegistry::default_bsc().unwrap();

        assert_eq!(registry.len(), 11);
        assert_eq!(
            registry.entries()[0].address,
            address!("a555b81736a9b1376dfcaa3bcbbeb56da4882b11")
        );
        assert_eq!(registry.entries()[0].description, "IDO Round (ref: tokenomics)");
        assert_eq!(registry.entries()[10].category, "Decubate Vesting");
        assert!(registry.iter().all(|r| r.chain == "BSC"));
    }

    #[test]
    fn test_malformed_address_is_config_error() {
        let err = AddressRegistry::from_entries(&[("0x1234", "BSC", "Vesting", "Seed")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let err = AddressRegistry::from_entries(&[
            ("0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11", "BSC", "A", "first"),
            ("0xA555B81736A9B1376DFCAA3BCBBEB56DA4882B11", "BSC", "B", "second"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAddress { .. }));
    }

    #[test]
    fn test_empty_registry_rejected() {
        let err = AddressRegistry::new(vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRegistry));
    }

    #[test]
    fn test_empty_description_rejected() {
        let err = AddressRegistry::from_entries(&[(
            "0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11",
            "BSC",
            "Vesting",
            "  ",
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyField {
                field: "description",
                ..
            }
        ));
    }

    #[test]
    fn test_json_with_bad_address_rejected() {
        let json = r#"[{"address": "nope", "chain": "BSC", "category": "x", "description": "y"}]"#;
        let err = AddressRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::RegistryDecode(_)));
    }

    #[test]
    fn test_explorer_url() {
        let registry = AddressRegistry::from_entries(&[(
            "0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11",
            "BSC",
            "Vesting",
            "IDO",
        )])
        .unwrap();
        let explorer = Url::parse("https://bscscan.com").unwrap();
        let token = address!("9840652dc04fb9db2c43853633f0f62be6f00f98");

        let url = registry.entries()[0].explorer_url(&explorer, token);

        assert_eq!(url.path(), format!("/token/{token}"));
        assert_eq!(
            url.query(),
            Some(format!("a={}", registry.entries()[0].address).as_str())
        );
    }

    #[test]
    fn test_explorer_url_keeps_path_prefix() {
        let registry = AddressRegistry::from_entries(&[(
            "0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11",
            "BSC",
            "Vesting",
            "IDO",
        )])
        .unwrap();
        let token = address!("9840652dc04fb9db2c43853633f0f62be6f00f98");

        for base in ["https://explorer.example/bsc/", "https://explorer.example/bsc"] {
            let explorer = Url::parse(base).unwrap();
            let url = registry.entries()[0].explorer_url(&explorer, token);
            assert_eq!(url.path(), format!("/bsc/token/{token}"));
        }
    }
}
