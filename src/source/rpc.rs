// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! On-chain balance source backed by an alloy provider

use std::marker::PhantomData;

use alloy_erc20_full::LazyToken;
use alloy_network::{Ethereum, Network};
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionTrait;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::BalanceSource;
use crate::errors::SourceError;
use crate::types::tokens::TokenAmount;

/// Reads `balanceOf` and `totalSupply` straight from the token contract
///
/// Useful when an explorer API is unavailable or its rate limits are too
/// tight. Results reflect the provider's latest block.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_provider::ProviderBuilder;
/// use supplyscan::RpcSource;
///
/// let provider = ProviderBuilder::new().connect_http("https://bsc-dataseed.bnbchain.org".parse()?);
/// let source = RpcSource::new(provider);
/// ```
#[derive(Debug, Clone)]
pub struct RpcSource<P, N = Ethereum> {
    provider: P,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> RpcSource<P, N> {
    /// Wrap a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _network: PhantomData,
        }
    }
}

#[async_trait]
impl<P, N> BalanceSource for RpcSource<P, N>
where
    N: Network,
    P: Provider<N> + Clone + Send + Sync + 'static,
    N::TransactionResponse:
        TransactionTrait + alloy_provider::network::eip2718::Typed2718 + Send + Sync + Clone,
    N::ReceiptResponse: Send + Sync + std::fmt::Debug + Clone,
{
    async fn balance_of(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<TokenAmount, SourceError> {
        let contract = LazyToken::new(token, self.provider.clone());
        match contract.balance_of(holder).await {
            Ok(balance) => {
                debug!(%token, %holder, %balance, "Fetched holder balance over RPC");
                Ok(TokenAmount::new(balance))
            }
            Err(e) => {
                warn!(%token, %holder, error = ?e, "Failed to fetch token balance");
                Err(SourceError::unavailable(format!("balanceOf {holder}"), e))
            }
        }
    }

    async fn total_supply(&self, token: Address) -> Result<TokenAmount, SourceError> {
        let contract = LazyToken::new(token, self.provider.clone());
        match contract.total_supply().await {
            Ok(supply) => {
                debug!(%token, %supply, "Fetched total supply over RPC");
                Ok(TokenAmount::new(supply))
            }
            Err(e) => {
                warn!(%token, error = ?e, "Failed to fetch total supply");
                Err(SourceError::unavailable(format!("totalSupply {token}"), e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "rpc"
    }
}
