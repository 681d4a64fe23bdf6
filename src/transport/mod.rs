// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Outbound request pacing.
//!
//! Explorer APIs enforce per-key rate limits. The [`RateLimiter`] spaces out
//! upstream queries so a full aggregation pass never exceeds them.
//!
//! ## Usage
//!
//! ```rust
//! use supplyscan::transport::RateLimiter;
//! use std::time::Duration;
//!
//! // At most four queries per second, one every 250ms
//! let limiter = RateLimiter::with_min_delay(Duration::from_millis(250));
//! ```

mod rate_limit;

pub use rate_limit::RateLimiter;
