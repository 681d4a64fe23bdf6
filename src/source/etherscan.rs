// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Etherscan v2 multichain API balance source

use alloy_primitives::Address;
use alloy_transport_http::reqwest::Client;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::BalanceSource;
use crate::config::SupplyConfig;
use crate::errors::{ConfigError, SourceError};
use crate::types::tokens::TokenAmount;

const ACTION_TOKEN_BALANCE: &str = "tokenbalance";
const ACTION_TOKEN_SUPPLY: &str = "tokensupply";

/// Response envelope shared by every Etherscan endpoint
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    result: String,
}

/// Reads balances and total supply from an Etherscan-compatible explorer API
///
/// Every request carries the configured chain id, so one key works for any
/// chain the v2 API covers. Requests time out after
/// [`SupplyConfig::request_timeout`]; there is no retry.
///
/// # Example
///
/// ```rust,ignore
/// use supplyscan::{EtherscanSource, SupplyConfig};
///
/// let config = SupplyConfig::from_env()?;
/// let source = EtherscanSource::new(&config)?;
/// ```
#[derive(Debug, Clone)]
pub struct EtherscanSource {
    client: Client,
    api_url: Url,
    api_key: String,
    chain_id: u64,
}

impl EtherscanSource {
    /// Create a source with an HTTP client built from `config`
    pub fn new(config: &SupplyConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::invalid("request_timeout", e))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a source reusing an existing HTTP client
    pub fn with_client(client: Client, config: &SupplyConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            chain_id: config.chain_id(),
        }
    }

    fn request_url(&self, module: &str, action: &str, token: Address, holder: Option<Address>) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("chainid", &self.chain_id.to_string())
                .append_pair("module", module)
                .append_pair("action", action)
                .append_pair("contractaddress", &token.to_string());
            if let Some(holder) = holder {
                query
                    .append_pair("address", &holder.to_string())
                    .append_pair("tag", "latest");
            }
            query.append_pair("apikey", &self.api_key);
        }
        url
    }

    async fn query(&self, operation: &str, url: Url) -> Result<TokenAmount, SourceError> {
        // The URL carries the API key; strip it from every error before it is
        // logged or returned.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                let e = e.without_url();
                warn!(operation, error = %e, "Explorer request failed");
                SourceError::unavailable(operation, e)
            })?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::unavailable(operation, e.without_url()))?;

        parse_payload(operation, &body)
    }
}

/// Decode an explorer response body into a base-unit amount
fn parse_payload(operation: &str, body: &[u8]) -> Result<TokenAmount, SourceError> {
    let payload: EtherscanResponse = serde_json::from_slice(body)
        .map_err(|e| SourceError::invalid_response(operation, format!("undecodable body: {e}")))?;

    if payload.status != "1" {
        return Err(SourceError::invalid_response(
            operation,
            format!(
                "status {} ({}): {}",
                payload.status, payload.message, payload.result
            ),
        ));
    }

    payload
        .result
        .parse::<TokenAmount>()
        .map_err(|e| SourceError::invalid_response(operation, e.to_string()))
}

#[async_trait]
impl BalanceSource for EtherscanSource {
    async fn balance_of(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<TokenAmount, SourceError> {
        let operation = format!("{ACTION_TOKEN_BALANCE} {holder}");
        let url = self.request_url("account", ACTION_TOKEN_BALANCE, token, Some(holder));
        let balance = self.query(&operation, url).await?;
        debug!(%holder, %balance, "Fetched holder balance");
        Ok(balance)
    }

    async fn total_supply(&self, token: Address) -> Result<TokenAmount, SourceError> {
        let operation = format!("{ACTION_TOKEN_SUPPLY} {token}");
        let url = self.request_url("stats", ACTION_TOKEN_SUPPLY, token, None);
        let supply = self.query(&operation, url).await?;
        debug!(%token, %supply, "Fetched chain total supply");
        Ok(supply)
    }

    fn name(&self) -> &'static str {
        "etherscan"
    }
}
