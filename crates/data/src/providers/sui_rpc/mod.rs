//! Sui full node JSON-RPC client.

mod dto;

use crate::ChainNodeProvider;
use crate::error::DataError;
use crate::models::{CoinBalance, CoinPage};
use crate::providers::read_json;
use async_trait::async_trait;
use dto::{BalanceDto, CoinMetadataDto, CoinPageDto, RpcRequest, RpcResponse, SERVICE};
use riverr_domain::TokenDescriptor;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

/// Public Sui mainnet full node.
pub const DEFAULT_RPC_URL: &str = "https://fullnode.mainnet.sui.io:443";

/// Configuration for [`SuiRpcProvider`].
#[derive(Debug, Clone)]
pub struct SuiRpcConfig {
    /// Full node URL.
    pub url: String,
}

impl Default for SuiRpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

/// Sui JSON-RPC client.
#[derive(Debug)]
pub struct SuiRpcProvider {
    client: reqwest::Client,
    config: SuiRpcConfig,
    next_id: AtomicU64,
}

impl SuiRpcProvider {
    pub fn new(config: SuiRpcConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: SuiRpcConfig) -> Self {
        Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    /// Sends one JSON-RPC call and decodes its `result`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, DataError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(method = method, id = request.id, "Sui RPC call");

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await?;
        let envelope: RpcResponse = read_json(SERVICE, response).await?;

        if let Some(error) = envelope.error {
            return Err(DataError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        serde_json::from_value(envelope.result).map_err(|e| DataError::malformed(SERVICE, e))
    }
}

impl Default for SuiRpcProvider {
    fn default() -> Self {
        Self::new(SuiRpcConfig::default())
    }
}

#[async_trait]
impl ChainNodeProvider for SuiRpcProvider {
    #[instrument(skip(self))]
    async fn get_all_balances(&self, owner: &str) -> Result<Vec<CoinBalance>, DataError> {
        let balances: Vec<BalanceDto> = self.call("suix_getAllBalances", json!([owner])).await?;
        balances.into_iter().map(BalanceDto::into_balance).collect()
    }

    #[instrument(skip(self))]
    async fn get_coin_metadata(&self, coin_type: &str) -> Result<TokenDescriptor, DataError> {
        let metadata: Option<CoinMetadataDto> =
            self.call("suix_getCoinMetadata", json!([coin_type])).await?;
        metadata
            .map(|m| m.into_descriptor(coin_type))
            .ok_or_else(|| DataError::NotFound(format!("metadata for {coin_type}")))
    }

    #[instrument(skip(self))]
    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<CoinPage, DataError> {
        let page: CoinPageDto = self
            .call("suix_getCoins", json!([owner, coin_type, cursor, limit]))
            .await?;
        page.into_page()
    }
}
