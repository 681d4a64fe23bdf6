// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across supplyscan.
//!
//! Raw base-unit balances and derived whole-token quantities get distinct
//! newtypes so they cannot be mixed in supply arithmetic.

pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here
