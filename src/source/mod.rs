//! External balance sources
//!
//! A [`BalanceSource`] answers two questions about a token: how many base
//! units a holder owns, and what the chain reports as the token's total
//! supply. The aggregation engine treats it as an opaque async capability
//! and performs no retries; a failure aborts the pass that issued it.
//!
//! Two implementations ship with the crate:
//!
//! - [`EtherscanSource`]: Etherscan v2 multichain HTTP API (`tokenbalance` /
//!   `tokensupply`), keyed by an API key and a chain id
//! - [`RpcSource`]: direct `balanceOf` / `totalSupply` calls through any
//!   alloy [`Provider`](alloy_provider::Provider)
//!
//! # Example: Implementing BalanceSource
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use supplyscan::{BalanceSource, SourceError, TokenAmount};
//! use alloy_primitives::Address;
//!
//! struct FixedSource;
//!
//! #[async_trait]
//! impl BalanceSource for FixedSource {
//!     async fn balance_of(&self, _token: Address, _holder: Address) -> Result<TokenAmount, SourceError> {
//!         Ok(TokenAmount::from(0u64))
//!     }
//!
//!     async fn total_supply(&self, _token: Address) -> Result<TokenAmount, SourceError> {
//!         Ok(TokenAmount::from(1_000u64))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "fixed"
//!     }
//! }
//! ```

use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::errors::SourceError;
use crate::types::tokens::TokenAmount;

mod etherscan;
mod rpc;

pub use etherscan::EtherscanSource;
pub use rpc::RpcSource;

/// Capability to read token balances and total supply at the latest state
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Balance of `holder` in `token`, in base units
    async fn balance_of(&self, token: Address, holder: Address)
        -> Result<TokenAmount, SourceError>;

    /// Total supply of `token` as the chain reports it, in base units
    async fn total_supply(&self, token: Address) -> Result<TokenAmount, SourceError>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S> BalanceSource for Arc<S>
where
    S: BalanceSource + ?Sized,
{
    async fn balance_of(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<TokenAmount, SourceError> {
        (**self).balance_of(token, holder).await
    }

    async fn total_supply(&self, token: Address) -> Result<TokenAmount, SourceError> {
        (**self).total_supply(token).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
