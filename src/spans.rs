//! Span creation helpers for supplyscan operations.
//!
//! Telemetry stays out of business logic: each instrumented operation has a
//! span helper here, and callers attach it with `tracing::Instrument` so the
//! span follows the future across await points.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::{Level, Span};

/// Create span for serving one metric request.
///
/// Parent: None (root span for this operation)
/// Children: aggregation_pass span on a cache miss
#[inline]
pub(crate) fn metric_request(metric: &str) -> Span {
    tracing::span!(Level::INFO, "supplyscan.metric_request", metric = metric)
}

/// Create span for a full fetch-and-compute pass after a cache miss.
///
/// Parent: metric_request span
/// Children: fetch_balances, fetch_total_supply spans
#[inline]
pub(crate) fn aggregation_pass(metric: &str, token: Address) -> Span {
    tracing::info_span!(
        "supplyscan.aggregation_pass",
        metric = metric,
        token = %token,
    )
}

/// Create span for the sequential per-address balance loop.
///
/// Parent: aggregation_pass span
/// Children: balance source requests
#[inline]
pub(crate) fn fetch_balances(token: Address, addresses: usize) -> Span {
    tracing::debug_span!(
        "supplyscan.fetch_balances",
        token = %token,
        addresses = addresses,
    )
}

/// Create span for the chain total supply query.
///
/// Parent: aggregation_pass span, or none when served outside a pass
#[inline]
pub(crate) fn fetch_total_supply(token: Address) -> Span {
    tracing::debug_span!("supplyscan.fetch_total_supply", token = %token)
}
