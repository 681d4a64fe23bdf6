// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sequential, rate-limited balance fetching
//!
//! Visits every registry entry exactly once, in registry order, pacing each
//! query through a shared [`RateLimiter`]. Queries never overlap. The first
//! failure stops the loop; balances gathered up to that point are dropped.

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{debug, info, warn, Instrument};

use crate::errors::SourceError;
use crate::registry::{AddressRegistry, ExcludedAddress};
use crate::source::BalanceSource;
use crate::spans;
use crate::transport::RateLimiter;
use crate::types::tokens::{TokenAmount, TokenDecimals, WholeTokens};

/// Balance of one excluded address, as observed in a single pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceObservation {
    /// The registry entry that was queried
    pub record: ExcludedAddress,
    /// Balance in base units
    pub raw_balance: TokenAmount,
}

impl BalanceObservation {
    /// Balance floored to whole tokens
    pub fn whole_tokens(&self, decimals: TokenDecimals) -> WholeTokens {
        self.raw_balance.to_whole_tokens(decimals)
    }
}

/// Issues balance queries one at a time under a rate limit
#[derive(Debug, Clone)]
pub struct RateLimitedFetcher<S> {
    source: S,
    limiter: RateLimiter,
}

impl<S: BalanceSource> RateLimitedFetcher<S> {
    /// Create a fetcher over `source`, paced by `limiter`
    pub fn new(source: S, limiter: RateLimiter) -> Self {
        Self { source, limiter }
    }

    /// The limiter pacing this fetcher
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Fetch the balance of every registry entry in `token`
    ///
    /// Returns observations in registry order. Consecutive queries start at
    /// least one limiter interval apart.
    pub async fn fetch_balances(
        &self,
        registry: &AddressRegistry,
        token: Address,
    ) -> Result<Vec<BalanceObservation>, SourceError> {
        let span = spans::fetch_balances(token, registry.len());

        async move {
            let mut observations = Vec::with_capacity(registry.len());

            for (index, record) in registry.iter().enumerate() {
                self.limiter.acquire().await;

                let raw_balance = self
                    .source
                    .balance_of(token, record.address)
                    .await
                    .inspect_err(|e| {
                        warn!(
                            index,
                            holder = %record.address,
                            remaining = registry.len() - index - 1,
                            error = %e,
                            "Balance query failed, aborting pass"
                        );
                    })?;

                debug!(index, holder = %record.address, %raw_balance, "Observed balance");
                observations.push(BalanceObservation {
                    record: record.clone(),
                    raw_balance,
                });
            }

            info!(
                count = observations.len(),
                source = self.source.name(),
                "Fetched excluded address balances"
            );
            Ok(observations)
        }
        .instrument(span)
        .await
    }

    /// Fetch the chain-reported total supply of `token`
    ///
    /// Shares the limiter with balance queries since both hit the same API key.
    pub async fn fetch_total_supply(&self, token: Address) -> Result<TokenAmount, SourceError> {
        self.limiter.acquire().await;
        self.source
            .total_supply(token)
            .instrument(spans::fetch_total_supply(token))
            .await
    }
}
