//! Configuration for supply tracking
//!
//! This module provides the settings a [`SupplyTracker`](crate::SupplyTracker)
//! and its balance sources are built from: the token being tracked, its
//! maximum supply, upstream API access, and the timing knobs for caching and
//! rate limiting.
//!
//! # Example: From the environment
//!
//! ```rust,no_run
//! use supplyscan::SupplyConfig;
//!
//! // Reads BSCSCAN_API_KEY, CGPT_CONTRACT_ADDRESS and CGPT_MAX_SUPPLY
//! let config = SupplyConfig::from_env()?;
//! # Ok::<(), supplyscan::ConfigError>(())
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use supplyscan::{SupplyConfigBuilder, WholeTokens};
//! use alloy_primitives::address;
//! use std::time::Duration;
//!
//! let config = SupplyConfigBuilder::new(
//!     address!("9840652dc04fb9db2c43853633f0f62be6f00f98"),
//!     WholeTokens::from(1_000_000_000),
//! )
//! .api_key("my-key")
//! .cache_ttl(Duration::from_secs(60))
//! .rate_limit_delay(Duration::from_millis(500))
//! .build()?;
//! # Ok::<(), supplyscan::ConfigError>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use url::Url;

use crate::errors::ConfigError;
use crate::types::tokens::{TokenDecimals, WholeTokens};

pub mod constants;

use constants::{
    BSCSCAN_EXPLORER_URL, DEFAULT_CACHE_TTL, DEFAULT_RATE_LIMIT_DELAY, DEFAULT_REQUEST_TIMEOUT,
    ETHERSCAN_V2_API_URL,
};

/// Environment variable holding the explorer API key
pub const ENV_API_KEY: &str = "BSCSCAN_API_KEY";
/// Environment variable holding the tracked token's contract address
pub const ENV_CONTRACT_ADDRESS: &str = "CGPT_CONTRACT_ADDRESS";
/// Environment variable holding the maximum supply in whole tokens
pub const ENV_MAX_SUPPLY: &str = "CGPT_MAX_SUPPLY";
/// Optional: numeric chain id (default 56, BNB Smart Chain)
pub const ENV_CHAIN_ID: &str = "SUPPLY_CHAIN_ID";
/// Optional: cache TTL in seconds
pub const ENV_CACHE_TTL_SECS: &str = "SUPPLY_CACHE_TTL_SECS";
/// Optional: minimum delay between upstream queries in milliseconds
pub const ENV_RATE_LIMIT_MS: &str = "SUPPLY_RATE_LIMIT_MS";
/// Optional: per-request timeout in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SUPPLY_REQUEST_TIMEOUT_SECS";
/// Optional: override of the Etherscan-compatible API endpoint
pub const ENV_API_URL: &str = "ETHERSCAN_API_URL";

/// Configuration for supply tracking
///
/// Use [`SupplyConfigBuilder`] to construct instances, or
/// [`SupplyConfig::from_env`] to read the process environment.
#[derive(Clone)]
pub struct SupplyConfig {
    /// API key for the Etherscan-compatible explorer
    pub api_key: String,

    /// Contract address of the tracked token
    pub token_address: Address,

    /// Configured maximum supply, in whole tokens
    pub max_supply: WholeTokens,

    /// Chain the token lives on
    /// Default: BNB Smart Chain (56)
    pub chain: NamedChain,

    /// Token decimals used to floor base units into whole tokens
    /// Default: 18
    pub decimals: TokenDecimals,

    /// Lifetime of every cached metric
    /// Default: 600 seconds
    pub cache_ttl: Duration,

    /// Minimum spacing between the starts of consecutive upstream queries
    /// Default: 250ms
    pub rate_limit_delay: Duration,

    /// Timeout for a single upstream HTTP request
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Etherscan-compatible API endpoint
    pub api_url: Url,

    /// Block explorer used to build per-holder links
    pub explorer_url: Url,
}

impl fmt::Debug for SupplyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplyConfig")
            .field("api_key", &"<redacted>")
            .field("token_address", &self.token_address)
            .field("max_supply", &self.max_supply)
            .field("chain", &self.chain)
            .field("decimals", &self.decimals)
            .field("cache_ttl", &self.cache_ttl)
            .field("rate_limit_delay", &self.rate_limit_delay)
            .field("request_timeout", &self.request_timeout)
            .field("api_url", &self.api_url.as_str())
            .field("explorer_url", &self.explorer_url.as_str())
            .finish()
    }
}

impl SupplyConfig {
    /// Load configuration from the process environment
    ///
    /// Values are read with `dotenvy`, so a `.env` file loaded earlier by the
    /// binary is honored. Required: `BSCSCAN_API_KEY`, `CGPT_CONTRACT_ADDRESS`,
    /// `CGPT_MAX_SUPPLY`. Everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| get(name).ok_or_else(|| ConfigError::missing(name));

        let api_key = require(ENV_API_KEY)?;
        let token_address = parse_var::<Address>(ENV_CONTRACT_ADDRESS, &require(ENV_CONTRACT_ADDRESS)?)?;
        let max_supply = parse_var::<WholeTokens>(ENV_MAX_SUPPLY, &require(ENV_MAX_SUPPLY)?)?;

        let mut builder = SupplyConfigBuilder::new(token_address, max_supply).api_key(api_key);

        if let Some(raw) = get(ENV_CHAIN_ID) {
            let id = parse_var::<u64>(ENV_CHAIN_ID, &raw)?;
            let chain = NamedChain::try_from(id)
                .map_err(|_| ConfigError::invalid(ENV_CHAIN_ID, format!("unknown chain id {id}")))?;
            builder = builder.chain(chain);
        }
        if let Some(raw) = get(ENV_CACHE_TTL_SECS) {
            builder = builder.cache_ttl(Duration::from_secs(parse_var(ENV_CACHE_TTL_SECS, &raw)?));
        }
        if let Some(raw) = get(ENV_RATE_LIMIT_MS) {
            builder =
                builder.rate_limit_delay(Duration::from_millis(parse_var(ENV_RATE_LIMIT_MS, &raw)?));
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
            builder = builder
                .request_timeout(Duration::from_secs(parse_var(ENV_REQUEST_TIMEOUT_SECS, &raw)?));
        }
        if let Some(raw) = get(ENV_API_URL) {
            builder = builder.api_url(parse_var::<Url>(ENV_API_URL, &raw)?);
        }

        builder.build()
    }

    /// Numeric chain id passed to multichain explorer APIs
    pub fn chain_id(&self) -> u64 {
        self.chain as u64
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(name, e))
}

/// Builder for [`SupplyConfig`]
///
/// # Example
///
/// ```rust
/// use supplyscan::{SupplyConfigBuilder, WholeTokens};
/// use alloy_chains::NamedChain;
/// use alloy_primitives::Address;
///
/// let config = SupplyConfigBuilder::new(Address::ZERO, WholeTokens::from(21_000_000))
///     .chain(NamedChain::Mainnet)
///     .build()
///     .unwrap();
/// assert_eq!(config.chain_id(), 1);
/// ```
pub struct SupplyConfigBuilder {
    api_key: String,
    token_address: Address,
    max_supply: WholeTokens,
    chain: NamedChain,
    decimals: TokenDecimals,
    cache_ttl: Duration,
    rate_limit_delay: Duration,
    request_timeout: Duration,
    api_url: Option<Url>,
    explorer_url: Option<Url>,
}

impl SupplyConfigBuilder {
    /// Create a new builder with defaults for everything but the token
    pub fn new(token_address: Address, max_supply: WholeTokens) -> Self {
        Self {
            api_key: String::new(),
            token_address,
            max_supply,
            chain: NamedChain::BinanceSmartChain,
            decimals: TokenDecimals::STANDARD,
            cache_ttl: DEFAULT_CACHE_TTL,
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            api_url: None,
            explorer_url: None,
        }
    }

    /// Set the explorer API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the chain
    pub fn chain(mut self, chain: NamedChain) -> Self {
        self.chain = chain;
        self
    }

    /// Set token decimals
    pub fn decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set cache TTL
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set minimum delay between upstream queries
    pub fn rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Set per-request HTTP timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the Etherscan-compatible API endpoint
    pub fn api_url(mut self, url: Url) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Set the block explorer used for holder links
    pub fn explorer_url(mut self, url: Url) -> Self {
        self.explorer_url = Some(url);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<SupplyConfig, ConfigError> {
        if self.max_supply.is_negative() {
            return Err(ConfigError::invalid(
                ENV_MAX_SUPPLY,
                "maximum supply cannot be negative",
            ));
        }
        if !self.decimals.is_reasonable() {
            return Err(ConfigError::invalid(
                "decimals",
                format!("{} is above {}", self.decimals, TokenDecimals::MAX_REASONABLE),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::invalid(ENV_CACHE_TTL_SECS, "TTL must be non-zero"));
        }

        let api_url = match self.api_url {
            Some(url) => url,
            None => parse_var(ENV_API_URL, ETHERSCAN_V2_API_URL)?,
        };
        let explorer_url = match self.explorer_url {
            Some(url) => url,
            None => parse_var("explorer_url", BSCSCAN_EXPLORER_URL)?,
        };

        Ok(SupplyConfig {
            api_key: self.api_key,
            token_address: self.token_address,
            max_supply: self.max_supply,
            chain: self.chain,
            decimals: self.decimals,
            cache_ttl: self.cache_ttl,
            rate_limit_delay: self.rate_limit_delay,
            request_timeout: self.request_timeout,
            api_url,
            explorer_url,
        })
    }
}
