// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Signed whole-token quantity

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A count of whole tokens, after flooring away base-unit remainders
///
/// Supply figures are derived by subtraction, and a misconfigured maximum
/// supply can drive them below zero. The value is signed so that condition
/// stays visible instead of wrapping or clamping. Arithmetic saturates at the
/// `I256` bounds.
///
/// Serializes as a decimal string.
///
/// # Examples
///
/// ```
/// use supplyscan::WholeTokens;
///
/// let max = WholeTokens::from(1_000_000_000i64);
/// let burnt = WholeTokens::from(900_000i64);
/// assert_eq!((max - burnt).to_string(), "999100000");
/// assert!((burnt - max).is_negative());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WholeTokens(I256);

impl WholeTokens {
    /// Zero tokens
    pub const ZERO: Self = Self(I256::ZERO);

    /// Wrap a signed 256-bit value
    pub const fn new(value: I256) -> Self {
        Self(value)
    }

    /// Convert an unsigned count, saturating at `I256::MAX`
    ///
    /// Only counts of at least 2^255 whole tokens saturate.
    pub fn from_unsigned(value: U256) -> Self {
        Self(I256::try_from(value).unwrap_or(I256::MAX))
    }

    /// Get the inner I256 value
    pub const fn as_i256(&self) -> I256 {
        self.0
    }

    /// Whether this quantity is below zero
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl From<i64> for WholeTokens {
    fn from(value: i64) -> Self {
        Self(I256::try_from(value).unwrap_or(I256::ZERO))
    }
}

impl Add for WholeTokens {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for WholeTokens {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for WholeTokens {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl FromStr for WholeTokens {
    type Err = alloy_primitives::ParseSignedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        I256::from_dec_str(s.trim()).map(Self)
    }
}

impl std::fmt::Display for WholeTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl Serialize for WholeTokens {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WholeTokens {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
