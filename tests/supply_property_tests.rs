// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for supply derivation and fetch pacing
//!
//! These tests use proptest to check the circulating-supply formula, the
//! ordering of reported balances, and rate-limiter spacing across a wide
//! range of inputs.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use helpers::{holder, registry, MockBalanceSource, TOKEN};
use proptest::prelude::*;
use supplyscan::{
    BalanceObservation, ExcludedAddress, RateLimitedFetcher, RateLimiter, SupplyCalculator,
    TokenAmount, TokenDecimals, WholeTokens,
};

const UNIT: u128 = 1_000_000_000_000_000_000;

// Balances up to 10^12 whole tokens, often with a fractional part
fn arb_balance() -> impl Strategy<Value = u128> {
    prop_oneof![
        Just(0u128),
        0u128..UNIT,
        0u128..1_000_000_000_000u128 * UNIT,
        (0u128..1_000u128).prop_map(|n| n * UNIT),
    ]
}

fn observations(balances: &[u128]) -> Vec<BalanceObservation> {
    balances
        .iter()
        .enumerate()
        .map(|(i, &balance)| BalanceObservation {
            record: ExcludedAddress {
                address: holder(i as u8),
                chain: "BSC".to_string(),
                category: "Vesting".to_string(),
                description: format!("wallet {i}"),
            },
            raw_balance: TokenAmount::new(U256::from(balance)),
        })
        .collect()
}

fn registry_index(observation: &BalanceObservation) -> u8 {
    observation.record.address.0[0] - 1
}

proptest! {
    /// Property: circulating equals floor(T) minus the sum of floored balances
    #[test]
    fn prop_circulating_matches_formula(
        balances in prop::collection::vec(arb_balance(), 0..20),
        chain_total in 0u128..100_000_000_000_000_000u128 * UNIT,
        max_supply in 0i64..100_000_000_000_000_000i64,
    ) {
        let calculator = SupplyCalculator::new(WholeTokens::from(max_supply), TokenDecimals::STANDARD);
        let metrics = calculator.calculate(
            observations(&balances),
            TokenAmount::new(U256::from(chain_total)),
        );

        // Floor each term individually
        let excluded: i64 = balances.iter().map(|b| (b / UNIT) as i64).sum();
        let chain_whole = (chain_total / UNIT) as i64;

        prop_assert_eq!(metrics.excluded_sum(), WholeTokens::from(excluded));
        prop_assert_eq!(metrics.burnt(), WholeTokens::from(max_supply - chain_whole));
        prop_assert_eq!(metrics.circulating(), WholeTokens::from(chain_whole - excluded));
        prop_assert_eq!(metrics.total_supply(), WholeTokens::from(chain_whole));
    }

    /// Property: balances come back largest first, ties in registry order
    #[test]
    fn prop_balances_sorted_stable(
        balances in prop::collection::vec((0u128..4).prop_map(|n| n * UNIT), 1..20),
    ) {
        let calculator = SupplyCalculator::new(WholeTokens::from(1_000_000_000), TokenDecimals::STANDARD);
        let metrics = calculator.calculate(observations(&balances), TokenAmount::ZERO);
        let sorted = metrics.balances();

        prop_assert_eq!(sorted.len(), balances.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].raw_balance >= pair[1].raw_balance);
            if pair[0].raw_balance == pair[1].raw_balance {
                prop_assert!(registry_index(&pair[0]) < registry_index(&pair[1]));
            }
        }
    }

    /// Property: consecutive balance queries start at least one delay apart
    #[test]
    fn prop_fetch_respects_min_delay(
        delay_ms in 0u64..=2_000,
        addresses in 1u8..12,
    ) {
        let delay = Duration::from_millis(delay_ms);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let calls = runtime.block_on(async {
            let mock = Arc::new(MockBalanceSource::new(TokenAmount::ZERO));
            let fetcher = RateLimitedFetcher::new(Arc::clone(&mock), RateLimiter::with_min_delay(delay));
            fetcher.fetch_balances(&registry(addresses), TOKEN).await.unwrap();
            mock.calls()
        });

        prop_assert_eq!(calls.len(), addresses as usize);
        for pair in calls.windows(2) {
            prop_assert!(pair[1].at - pair[0].at >= delay);
        }
    }
}
