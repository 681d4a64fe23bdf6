// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached supply metrics for a single token
//!
//! [`SupplyTracker`] answers metric requests from its cache and runs a full
//! aggregation pass on a miss:
//!
//! 1. Look up the metric key in the metric cache; a hit is returned as-is.
//! 2. Fetch every excluded balance sequentially through the rate limiter.
//! 3. Fetch the chain-reported total supply (memoized in its own cache).
//! 4. Derive [`SupplyMetrics`] and store the requested metric.
//!
//! A failure anywhere in steps 2-4 propagates to the caller and nothing is
//! cached. Keys are cached independently, so `supply` and `burn` may have
//! been computed from different passes.
//!
//! Concurrent misses on the same key are not coalesced: each runs its own
//! pass and the last write wins.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{debug, info, Instrument};

use crate::cache::{CacheStats, TtlCache};
use crate::calculator::{SupplyCalculator, SupplyMetrics};
use crate::config::SupplyConfig;
use crate::errors::SourceError;
use crate::fetcher::RateLimitedFetcher;
use crate::registry::AddressRegistry;
use crate::source::BalanceSource;
use crate::spans;
use crate::transport::RateLimiter;
use crate::types::tokens::{TokenAmount, WholeTokens};

/// Metric a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Full report including per-address balances
    Balances,
    /// Circulating supply
    Supply,
    /// Maximum supply minus burnt tokens
    TotalSupply,
    /// Burnt tokens
    Burn,
}

impl MetricKey {
    /// Every metric key
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Balances,
        MetricKey::Supply,
        MetricKey::TotalSupply,
        MetricKey::Burn,
    ];

    /// Wire name of the metric
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Balances => "balances",
            MetricKey::Supply => "supply",
            MetricKey::TotalSupply => "totalsupply",
            MetricKey::Burn => "burn",
        }
    }

    /// Headline figure of this metric in a computed report
    ///
    /// The `balances` report leads with the circulating supply.
    pub fn headline(&self, metrics: &SupplyMetrics) -> WholeTokens {
        match self {
            MetricKey::Balances | MetricKey::Supply => metrics.circulating(),
            MetricKey::TotalSupply => metrics.total_supply(),
            MetricKey::Burn => metrics.burnt(),
        }
    }

    /// Project a computed report onto this metric
    pub fn select(&self, metrics: SupplyMetrics) -> MetricValue {
        match self {
            MetricKey::Balances => MetricValue::Report(Arc::new(metrics)),
            _ => MetricValue::Tokens(self.headline(&metrics)),
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown metric name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metric: {name}")]
pub struct UnknownMetricError {
    /// The rejected name
    pub name: String,
}

impl FromStr for MetricKey {
    type Err = UnknownMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMetricError {
                name: s.to_string(),
            })
    }
}

/// Cached value of a metric
///
/// `balances` caches the full report; the headline metrics cache a bare
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Full supply report
    Report(Arc<SupplyMetrics>),
    /// Single whole-token figure
    Tokens(WholeTokens),
}

impl MetricValue {
    /// The full report, if this is one
    pub fn as_report(&self) -> Option<&Arc<SupplyMetrics>> {
        match self {
            MetricValue::Report(report) => Some(report),
            MetricValue::Tokens(_) => None,
        }
    }

    /// The bare figure, if this is one
    pub fn as_tokens(&self) -> Option<WholeTokens> {
        match self {
            MetricValue::Tokens(tokens) => Some(*tokens),
            MetricValue::Report(_) => None,
        }
    }
}

/// Metric cache shared between trackers, keyed by token and metric
pub type MetricCache = TtlCache<(Address, MetricKey), MetricValue>;

/// Serves supply metrics for one token, backed by TTL caches
///
/// Both caches are created once and shared behind `Arc`, so several trackers
/// (or a route layer and a background refresher) can observe the same
/// entries. Entries are keyed by token address, so trackers for different
/// tokens can share a cache without serving each other's figures. The caches
/// live as long as their last handle and need no teardown.
///
/// # Example
///
/// ```rust,no_run
/// use supplyscan::{AddressRegistry, EtherscanSource, SupplyConfig, SupplyTracker};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SupplyConfig::from_env()?;
/// let source = EtherscanSource::new(&config)?;
/// let tracker = SupplyTracker::new(source, AddressRegistry::default_bsc()?, &config);
///
/// let circulating = tracker.circulating_supply().await?;
/// println!("{circulating}");
/// # Ok(())
/// # }
/// ```
pub struct SupplyTracker<S> {
    fetcher: RateLimitedFetcher<S>,
    registry: AddressRegistry,
    calculator: SupplyCalculator,
    token: Address,
    metrics: Arc<MetricCache>,
    chain_supply: Arc<TtlCache<Address, TokenAmount>>,
}

impl<S: BalanceSource> SupplyTracker<S> {
    /// Create a tracker with fresh caches using the configured TTL
    pub fn new(source: S, registry: AddressRegistry, config: &SupplyConfig) -> Self {
        Self::with_caches(
            source,
            registry,
            config,
            Arc::new(TtlCache::new(config.cache_ttl)),
            Arc::new(TtlCache::new(config.cache_ttl)),
        )
    }

    /// Create a tracker over explicitly constructed caches
    ///
    /// `chain_supply` memoizes the chain-reported total supply per token.
    pub fn with_caches(
        source: S,
        registry: AddressRegistry,
        config: &SupplyConfig,
        metrics: Arc<MetricCache>,
        chain_supply: Arc<TtlCache<Address, TokenAmount>>,
    ) -> Self {
        let limiter = RateLimiter::with_min_delay(config.rate_limit_delay);
        Self {
            fetcher: RateLimitedFetcher::new(source, limiter),
            registry,
            calculator: SupplyCalculator::new(config.max_supply, config.decimals),
            token: config.token_address,
            metrics,
            chain_supply,
        }
    }

    /// The tracked token
    pub fn token(&self) -> Address {
        self.token
    }

    /// The excluded-address registry
    pub fn registry(&self) -> &AddressRegistry {
        &self.registry
    }

    /// Serve `key`, running an aggregation pass on a cache miss
    pub async fn metric(&self, key: MetricKey) -> Result<MetricValue, SourceError> {
        match key {
            MetricKey::Balances => self.balances().await.map(MetricValue::Report),
            _ => self.tokens(key).await.map(MetricValue::Tokens),
        }
    }

    /// Full report with per-address balances, largest first
    pub async fn balances(&self) -> Result<Arc<SupplyMetrics>, SourceError> {
        let key = MetricKey::Balances;
        async move {
            if let Some(MetricValue::Report(report)) = self.metrics.get(&(self.token, key)).await {
                return Ok(report);
            }

            let report = Arc::new(self.aggregate(key).await?);
            self.metrics
                .insert((self.token, key), MetricValue::Report(Arc::clone(&report)))
                .await;
            Ok(report)
        }
        .instrument(spans::metric_request(key.as_str()))
        .await
    }

    /// Circulating supply in whole tokens
    pub async fn circulating_supply(&self) -> Result<WholeTokens, SourceError> {
        self.tokens(MetricKey::Supply).await
    }

    /// Maximum supply minus burnt tokens
    pub async fn total_supply(&self) -> Result<WholeTokens, SourceError> {
        self.tokens(MetricKey::TotalSupply).await
    }

    /// Burnt tokens
    pub async fn burnt(&self) -> Result<WholeTokens, SourceError> {
        self.tokens(MetricKey::Burn).await
    }

    /// Chain-reported total supply in base units
    ///
    /// Memoized in its own cache; expiring it does not affect metric entries.
    pub async fn chain_total_supply(&self) -> Result<TokenAmount, SourceError> {
        if let Some(supply) = self.chain_supply.get(&self.token).await {
            return Ok(supply);
        }

        let supply = self.fetcher.fetch_total_supply(self.token).await?;
        self.chain_supply.insert(self.token, supply).await;
        Ok(supply)
    }

    /// Statistics of the metric cache, across every token sharing it
    pub async fn cache_stats(&self) -> CacheStats {
        self.metrics.stats().await
    }

    async fn tokens(&self, key: MetricKey) -> Result<WholeTokens, SourceError> {
        async move {
            if let Some(MetricValue::Tokens(tokens)) = self.metrics.get(&(self.token, key)).await {
                return Ok(tokens);
            }

            let tokens = key.headline(&self.aggregate(key).await?);
            self.metrics
                .insert((self.token, key), MetricValue::Tokens(tokens))
                .await;
            Ok(tokens)
        }
        .instrument(spans::metric_request(key.as_str()))
        .await
    }

    async fn aggregate(&self, key: MetricKey) -> Result<SupplyMetrics, SourceError> {
        async move {
            info!(addresses = self.registry.len(), "Cache miss, starting aggregation pass");

            let observations = self.fetcher.fetch_balances(&self.registry, self.token).await?;
            let chain_total = self.chain_total_supply().await?;
            let metrics = self.calculator.calculate(observations, chain_total);

            info!(
                excluded_sum = %metrics.excluded_sum(),
                burnt = %metrics.burnt(),
                circulating = %metrics.circulating(),
                "Aggregation pass complete"
            );
            debug!(computed_at = %metrics.computed_at(), "Caching {key}");
            Ok(metrics)
        }
        .instrument(spans::aggregation_pass(key.as_str(), self.token))
        .await
    }
}

impl<S> fmt::Debug for SupplyTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplyTracker")
            .field("token", &self.token)
            .field("addresses", &self.registry.len())
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}
