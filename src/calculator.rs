// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Supply metric derivation
//!
//! Turns one pass worth of balance observations plus the chain-reported total
//! supply into [`SupplyMetrics`]. Pure and stateless.
//!
//! # Rounding
//!
//! Every balance is floored to whole tokens individually and the floored
//! values are summed. This is not the same as flooring the sum: three wallets
//! holding 0.9 tokens each contribute 0, not 2. Published figures have always
//! been computed this way, so it is kept.
//!
//! # Formulas
//!
//! ```text
//! excluded_sum = Σ floor(balance_i / 10^decimals)
//! burnt        = max_supply − floor(chain_total_supply / 10^decimals)
//! circulating  = max_supply − excluded_sum − burnt
//! total_supply = max_supply − burnt
//! ```
//!
//! Nothing is clamped. A negative circulating supply means the configured
//! maximum or the excluded list is wrong and is logged as a warning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::fetcher::BalanceObservation;
use crate::types::tokens::{TokenAmount, TokenDecimals, WholeTokens};

/// Supply figures derived from one aggregation pass
///
/// Constructed only by [`SupplyCalculator::calculate`], so
/// `circulating == max_supply − excluded_sum − burnt` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplyMetrics {
    max_supply: WholeTokens,
    chain_total_supply: WholeTokens,
    excluded_sum: WholeTokens,
    burnt: WholeTokens,
    circulating: WholeTokens,
    total_supply: WholeTokens,
    balances: Vec<BalanceObservation>,
    computed_at: DateTime<Utc>,
}

impl SupplyMetrics {
    /// Configured maximum supply
    pub fn max_supply(&self) -> WholeTokens {
        self.max_supply
    }

    /// Total supply according to the chain, floored to whole tokens
    pub fn chain_total_supply(&self) -> WholeTokens {
        self.chain_total_supply
    }

    /// Sum of the floored excluded-address balances
    pub fn excluded_sum(&self) -> WholeTokens {
        self.excluded_sum
    }

    /// Tokens missing from the chain's total supply relative to the maximum
    pub fn burnt(&self) -> WholeTokens {
        self.burnt
    }

    /// Maximum supply minus excluded holdings minus burnt tokens
    pub fn circulating(&self) -> WholeTokens {
        self.circulating
    }

    /// Maximum supply minus burnt tokens
    pub fn total_supply(&self) -> WholeTokens {
        self.total_supply
    }

    /// Per-address balances, largest first, ties in registry order
    pub fn balances(&self) -> &[BalanceObservation] {
        &self.balances
    }

    /// When the metrics were computed
    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }
}

/// Derives [`SupplyMetrics`] from raw observations
#[derive(Debug, Clone, Copy)]
pub struct SupplyCalculator {
    max_supply: WholeTokens,
    decimals: TokenDecimals,
}

impl SupplyCalculator {
    /// Create a calculator for a token with the given maximum supply
    pub fn new(max_supply: WholeTokens, decimals: TokenDecimals) -> Self {
        Self {
            max_supply,
            decimals,
        }
    }

    /// Compute metrics for one pass
    ///
    /// # Example
    ///
    /// ```rust
    /// use alloy_primitives::U256;
    /// use supplyscan::{SupplyCalculator, TokenAmount, TokenDecimals, WholeTokens};
    ///
    /// let calculator = SupplyCalculator::new(WholeTokens::from(1_000_000_000), TokenDecimals::STANDARD);
    /// let chain_total = TokenAmount::new(U256::from(900_000u64) * TokenDecimals::STANDARD.unit());
    ///
    /// let metrics = calculator.calculate(Vec::new(), chain_total);
    /// assert_eq!(metrics.burnt(), WholeTokens::from(999_100_000));
    /// assert_eq!(metrics.circulating(), WholeTokens::from(900_000));
    /// ```
    pub fn calculate(
        &self,
        mut observations: Vec<BalanceObservation>,
        chain_total_supply: TokenAmount,
    ) -> SupplyMetrics {
        // Stable: equal balances keep registry order
        observations.sort_by(|a, b| b.raw_balance.cmp(&a.raw_balance));

        let excluded_sum: WholeTokens = observations
            .iter()
            .map(|o| o.whole_tokens(self.decimals))
            .sum();

        let chain_total = chain_total_supply.to_whole_tokens(self.decimals);
        let burnt = self.max_supply - chain_total;
        let circulating = self.max_supply - excluded_sum - burnt;
        let total_supply = self.max_supply - burnt;

        if circulating.is_negative() {
            warn!(
                %circulating,
                %excluded_sum,
                %burnt,
                max_supply = %self.max_supply,
                "Circulating supply is negative; check max supply and excluded addresses"
            );
        }

        SupplyMetrics {
            max_supply: self.max_supply,
            chain_total_supply: chain_total,
            excluded_sum,
            burnt,
            circulating,
            total_supply,
            balances: observations,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ExcludedAddress;
    use alloy_primitives::{Address, U256};

    fn tokens(n: u64) -> TokenAmount {
        TokenAmount::new(U256::from(n) * TokenDecimals::STANDARD.unit())
    }

    fn observation(byte: u8, raw_balance: TokenAmount) -> BalanceObservation {
        BalanceObservation {
            record: ExcludedAddress {
                address: Address::repeat_byte(byte),
                chain: "BSC".to_string(),
                category: "Vesting".to_string(),
                description: format!("wallet {byte}"),
            },
            raw_balance,
        }
    }

    fn calculator() -> SupplyCalculator {
        SupplyCalculator::new(WholeTokens::from(1_000_000_000), TokenDecimals::STANDARD)
    }

    #[test]
    fn test_reference_example() {
        let observations = vec![
            observation(0xa, tokens(500)),
            observation(0xb, tokens(100)),
            observation(0xc, TokenAmount::ZERO),
        ];

        let metrics = calculator().calculate(observations, tokens(900_000));

        assert_eq!(metrics.excluded_sum(), WholeTokens::from(600));
        assert_eq!(metrics.burnt(), WholeTokens::from(999_100_000));
        // max - excluded - burnt, i.e. chain total minus excluded holdings
        assert_eq!(metrics.circulating(), WholeTokens::from(899_400));
        assert_eq!(metrics.total_supply(), WholeTokens::from(900_000));
        assert_eq!(metrics.chain_total_supply(), WholeTokens::from(900_000));
    }

    #[test]
    fn test_floors_each_balance_before_summing() {
        // Three wallets at 0.9 tokens each: floor-then-sum is 0, sum-then-floor would be 2
        let nine_tenths = TokenAmount::new(U256::from(900_000_000_000_000_000u64));
        let observations = vec![
            observation(1, nine_tenths),
            observation(2, nine_tenths),
            observation(3, nine_tenths),
        ];

        let metrics = calculator().calculate(observations, tokens(1_000));

        assert_eq!(metrics.excluded_sum(), WholeTokens::ZERO);
        assert_eq!(metrics.circulating(), WholeTokens::from(1_000));
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let observations = vec![
            observation(1, tokens(10)),
            observation(2, tokens(50)),
            observation(3, tokens(10)),
            observation(4, tokens(50)),
            observation(5, tokens(0)),
        ];

        let metrics = calculator().calculate(observations, tokens(1_000));
        let order: Vec<u8> = metrics
            .balances()
            .iter()
            .map(|o| o.record.address.0[0])
            .collect();

        assert_eq!(order, vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_negative_circulating_is_not_clamped() {
        let small = SupplyCalculator::new(WholeTokens::from(100), TokenDecimals::STANDARD);
        let observations = vec![observation(1, tokens(80))];

        let metrics = small.calculate(observations, tokens(50));

        // burnt = 100 - 50 = 50, circulating = 100 - 80 - 50 = -30
        assert_eq!(metrics.burnt(), WholeTokens::from(50));
        assert_eq!(metrics.circulating(), WholeTokens::from(-30));
        assert!(metrics.circulating().is_negative());
    }

    #[test]
    fn test_chain_supply_above_max_gives_negative_burn() {
        let metrics = SupplyCalculator::new(WholeTokens::from(1_000), TokenDecimals::STANDARD)
            .calculate(Vec::new(), tokens(1_200));

        assert_eq!(metrics.burnt(), WholeTokens::from(-200));
        assert_eq!(metrics.total_supply(), WholeTokens::from(1_200));
    }

    #[test]
    fn test_invariant_holds() {
        let observations = vec![observation(1, tokens(123)), observation(2, tokens(4_567))];
        let m = calculator().calculate(observations, tokens(987_654));

        assert_eq!(m.circulating(), m.max_supply() - m.excluded_sum() - m.burnt());
        assert_eq!(m.total_supply(), m.max_supply() - m.burnt());
    }

    #[test]
    fn test_serializes_structured_output() {
        let metrics = calculator().calculate(vec![observation(1, tokens(5))], tokens(10));
        let json = serde_json::to_value(&metrics).unwrap();

        assert_eq!(json["circulating"], "5");
        assert_eq!(json["balances"].as_array().unwrap().len(), 1);
        assert_eq!(json["balances"][0]["record"]["chain"], "BSC");
    }
}
