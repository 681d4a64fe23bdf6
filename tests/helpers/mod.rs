// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for supplyscan integration tests
//!
//! Provides a scripted [`BalanceSource`] so trackers can be exercised
//! without network access, plus small builders for configs and registries.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use supplyscan::{
    AddressRegistry, BalanceSource, ExcludedAddress, SourceError, SupplyConfig,
    SupplyConfigBuilder, SupplyTracker, TokenAmount, TokenDecimals, WholeTokens,
};
use tokio::time::Instant;

pub const TOKEN: Address = address!("9840652dc04fb9db2c43853633f0f62be6f00f98");
pub const MAX_SUPPLY: i64 = 1_000_000_000;
pub const RATE_LIMIT: Duration = Duration::from_millis(250);
pub const TTL: Duration = Duration::from_secs(600);

/// `n` whole tokens in base units
pub fn tokens(n: u64) -> TokenAmount {
    TokenAmount::new(U256::from(n) * TokenDecimals::STANDARD.unit())
}

/// What a recorded call asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Balance(Address),
    TotalSupply,
}

/// One call made against the mock, with the (possibly paused) tokio time
#[derive(Debug, Clone, Copy)]
pub struct SourceCall {
    pub kind: CallKind,
    pub at: Instant,
}

/// Mock BalanceSource for testing trackers and fetchers
///
/// Balances are scripted per holder (unscripted holders read as zero).
/// A failure can be injected on the k-th balance query.
///
/// # Example
///
/// ```rust,ignore
/// let mock = Arc::new(
///     MockBalanceSource::new(tokens(900_000))
///         .with_balance(holder, tokens(500))
///         .failing_on_balance_call(2),
/// );
/// let tracker = SupplyTracker::new(Arc::clone(&mock), registry, &config);
/// ```
pub struct MockBalanceSource {
    balances: HashMap<Address, TokenAmount>,
    total_supply: TokenAmount,
    fail_on_balance_call: Option<usize>,
    fail_total_supply: bool,
    latency: Duration,
    calls: Mutex<Vec<SourceCall>>,
}

impl MockBalanceSource {
    /// Create a mock reporting `total_supply` and zero balances
    pub fn new(total_supply: TokenAmount) -> Self {
        Self {
            balances: HashMap::new(),
            total_supply,
            fail_on_balance_call: None,
            fail_total_supply: false,
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the balance of `holder`
    pub fn with_balance(mut self, holder: Address, balance: TokenAmount) -> Self {
        self.balances.insert(holder, balance);
        self
    }

    /// Fail the k-th balance query (1-based) with `SourceUnavailable`
    pub fn failing_on_balance_call(mut self, k: usize) -> Self {
        self.fail_on_balance_call = Some(k);
        self
    }

    /// Fail every total supply query with `InvalidResponse`
    pub fn failing_total_supply(mut self) -> Self {
        self.fail_total_supply = true;
        self
    }

    /// Sleep this long inside every query
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls of any kind
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Holders queried, in order
    pub fn balance_queries(&self) -> Vec<Address> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call.kind {
                CallKind::Balance(holder) => Some(holder),
                CallKind::TotalSupply => None,
            })
            .collect()
    }

    /// Number of total supply queries
    pub fn total_supply_queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.kind == CallKind::TotalSupply)
            .count()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, kind: CallKind) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(SourceCall {
            kind,
            at: Instant::now(),
        });
        calls
            .iter()
            .filter(|call| matches!(call.kind, CallKind::Balance(_)))
            .count()
    }
}

#[async_trait]
impl BalanceSource for MockBalanceSource {
    async fn balance_of(&self, _token: Address, holder: Address) -> Result<TokenAmount, SourceError> {
        let nth = self.record(CallKind::Balance(holder));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.fail_on_balance_call == Some(nth) {
            return Err(SourceError::unavailable(
                format!("tokenbalance {holder}"),
                std::io::Error::new(std::io::ErrorKind::TimedOut, "injected timeout"),
            ));
        }
        Ok(self.balances.get(&holder).copied().unwrap_or(TokenAmount::ZERO))
    }

    async fn total_supply(&self, token: Address) -> Result<TokenAmount, SourceError> {
        self.record(CallKind::TotalSupply);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.fail_total_supply {
            return Err(SourceError::invalid_response(
                format!("tokensupply {token}"),
                "status 0 (NOTOK): Max rate limit reached",
            ));
        }
        Ok(self.total_supply)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Holder address for registry slot `i`
pub fn holder(i: u8) -> Address {
    Address::repeat_byte(i + 1)
}

/// Registry of `n` BSC wallets, `holder(0)..holder(n-1)` in order
pub fn registry(n: u8) -> AddressRegistry {
    let records = (0..n)
        .map(|i| ExcludedAddress {
            address: holder(i),
            chain: "BSC".to_string(),
            category: "Vesting".to_string(),
            description: format!("wallet {i}"),
        })
        .collect();
    AddressRegistry::new(records).unwrap()
}

/// Config with the default 250ms delay and 600s TTL
pub fn config() -> SupplyConfig {
    SupplyConfigBuilder::new(TOKEN, WholeTokens::from(MAX_SUPPLY))
        .api_key("test-key")
        .cache_ttl(TTL)
        .rate_limit_delay(RATE_LIMIT)
        .build()
        .unwrap()
}

/// Three-wallet setup: A=500, B=100, C=0 tokens, chain total 900,000 tokens
pub fn reference_setup() -> (Arc<MockBalanceSource>, SupplyTracker<Arc<MockBalanceSource>>) {
    let mock = Arc::new(
        MockBalanceSource::new(tokens(900_000))
            .with_balance(holder(0), tokens(500))
            .with_balance(holder(1), tokens(100))
            .with_balance(holder(2), TokenAmount::ZERO),
    );
    let tracker = SupplyTracker::new(Arc::clone(&mock), registry(3), &config());
    (mock, tracker)
}
