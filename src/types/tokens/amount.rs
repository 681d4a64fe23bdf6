// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::str::FromStr;

use super::decimals::TokenDecimals;
use super::whole::WholeTokens;

/// Raw token amount in base units
///
/// This is the balance exactly as the chain reports it, in the token's
/// smallest indivisible unit. A token with 18 decimals and a billion-token
/// supply already needs 10^27 base units, so the inner value is a `U256`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use supplyscan::{TokenAmount, TokenDecimals};
///
/// // 1.5 tokens with 18 decimals
/// let amount = TokenAmount::new(U256::from(1_500_000_000_000_000_000u64));
/// assert_eq!(amount.to_whole_tokens(TokenDecimals::STANDARD).to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Floor-divide by `10^decimals`, discarding any fractional remainder
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use supplyscan::{TokenAmount, TokenDecimals};
    ///
    /// // 100.999999 USDC floors to 100
    /// let raw = TokenAmount::new(U256::from(100_999_999u64));
    /// assert_eq!(raw.to_whole_tokens(TokenDecimals::USDC).to_string(), "100");
    /// ```
    pub fn to_whole_tokens(&self, decimals: TokenDecimals) -> WholeTokens {
        WholeTokens::from_unsigned(self.0 / decimals.unit())
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Error returned when a string is not a base-10 unsigned integer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an unsigned base-10 integer: {input:?}")]
pub struct ParseTokenAmountError {
    /// The rejected input
    pub input: String,
}

impl FromStr for TokenAmount {
    type Err = ParseTokenAmountError;

    /// Parses a base-10 integer, the format balance APIs return.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let err = || ParseTokenAmountError {
            input: s.to_string(),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        U256::from_str_radix(digits, 10).map(Self).map_err(|_| err())
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
