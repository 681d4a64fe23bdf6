//! Circulating-supply tracking for ERC-20 style tokens.
//!
//! Reads the balances of a fixed list of excluded wallets and the chain's
//! reported total supply, derives burnt, circulating and total supply, and
//! serves those figures from a TTL cache.
//!
//! ```rust,no_run
//! use supplyscan::{AddressRegistry, EtherscanSource, MetricKey, SupplyConfig, SupplyTracker};
//!
//! # async fn example() -> Result<(), supplyscan::SupplyscanError> {
//! let config = SupplyConfig::from_env()?;
//! let tracker = SupplyTracker::new(
//!     EtherscanSource::new(&config)?,
//!     AddressRegistry::default_bsc()?,
//!     &config,
//! );
//!
//! let burn = tracker.metric(MetricKey::Burn).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod calculator;
pub mod config;
mod errors;
mod fetcher;
mod registry;
mod source;
mod spans;
mod tracker;
pub mod transport;
pub mod types;

pub use cache::{CacheStats, TtlCache};
pub use calculator::*;
pub use config::{SupplyConfig, SupplyConfigBuilder};
pub use errors::*;
pub use fetcher::*;
pub use registry::*;
pub use source::*;
pub use tracker::*;
pub use transport::RateLimiter;
pub use types::tokens::{ParseTokenAmountError, TokenAmount, TokenDecimals, WholeTokens};
