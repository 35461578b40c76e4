//! GeckoTerminal market-data client.

mod dto;

use crate::MarketDataProvider;
use crate::error::DataError;
use crate::providers::read_json;
use async_trait::async_trait;
use dto::{NetworksResponse, PoolListResponse, PoolResponse, SERVICE, TokenPriceResponse};
use reqwest::header::ACCEPT;
use riverr_domain::PoolRecord;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Public GeckoTerminal v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.geckoterminal.com/api/v2";

/// GeckoTerminal's identifier for Sui mainnet.
pub const SUI_NETWORK: &str = "sui-network";

/// Relationships embedded in pool responses.
const POOL_INCLUDES: &str = "base_token,quote_token";

/// Configuration for [`GeckoTerminalProvider`].
#[derive(Debug, Clone)]
pub struct GeckoTerminalConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Network used by the convenience methods.
    pub network: String,
}

impl Default for GeckoTerminalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            network: SUI_NETWORK.to_string(),
        }
    }
}

/// A network supported by GeckoTerminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// GeckoTerminal API client.
#[derive(Debug, Clone)]
pub struct GeckoTerminalProvider {
    client: reqwest::Client,
    config: GeckoTerminalConfig,
}

impl GeckoTerminalProvider {
    /// Creates a client with its own connection pool.
    pub fn new(config: GeckoTerminalConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client sharing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, config: GeckoTerminalConfig) -> Self {
        Self { client, config }
    }

    /// Network configured for this client.
    pub fn network(&self) -> &str {
        &self.config.network
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        debug!(url = %url, "GeckoTerminal request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        read_json(SERVICE, response).await
    }

    /// Fetches one pool by address.
    ///
    /// # Errors
    /// [`DataError::NotFound`] for an unknown pool; schema errors otherwise.
    #[instrument(skip(self))]
    pub async fn get_pool(&self, network: &str, address: &str) -> Result<PoolRecord, DataError> {
        let response: PoolResponse = self
            .fetch(
                &format!("/networks/{network}/pools/{address}"),
                &[("include", POOL_INCLUDES.to_string())],
            )
            .await?;
        response.into_record()
    }

    /// Fetches the network's trending pools.
    #[instrument(skip(self))]
    pub async fn get_trending_pools(
        &self,
        network: &str,
        page: Option<u32>,
    ) -> Result<Vec<PoolRecord>, DataError> {
        self.fetch_pool_list(&format!("/networks/{network}/trending_pools"), page)
            .await
    }

    /// Fetches the network's most recently created pools.
    #[instrument(skip(self))]
    pub async fn get_new_pools(
        &self,
        network: &str,
        page: Option<u32>,
    ) -> Result<Vec<PoolRecord>, DataError> {
        self.fetch_pool_list(&format!("/networks/{network}/new_pools"), page)
            .await
    }

    /// Lists the networks GeckoTerminal tracks.
    pub async fn get_networks(&self) -> Result<Vec<Network>, DataError> {
        let response: NetworksResponse = self.fetch("/networks", &[]).await?;
        Ok(response
            .data
            .into_iter()
            .map(|n| Network {
                id: n.id,
                name: n.attributes.name,
            })
            .collect())
    }

    async fn fetch_pool_list(
        &self,
        endpoint: &str,
        page: Option<u32>,
    ) -> Result<Vec<PoolRecord>, DataError> {
        let mut query = vec![("include", POOL_INCLUDES.to_string())];
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        let response: PoolListResponse = self.fetch(endpoint, &query).await?;
        response.into_records()
    }
}

impl Default for GeckoTerminalProvider {
    fn default() -> Self {
        Self::new(GeckoTerminalConfig::default())
    }
}

#[async_trait]
impl MarketDataProvider for GeckoTerminalProvider {
    #[instrument(skip(self, addresses), fields(count = addresses.len()))]
    async fn get_pools(
        &self,
        network: &str,
        addresses: &[String],
    ) -> Result<Vec<PoolRecord>, DataError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!("/networks/{network}/pools/multi/{}", addresses.join(","));
        let response: PoolListResponse = self
            .fetch(&endpoint, &[("include", POOL_INCLUDES.to_string())])
            .await?;
        let pools = response.into_records()?;

        debug!(pools = pools.len(), "Fetched pool snapshots");
        Ok(pools)
    }

    #[instrument(skip(self))]
    async fn get_token_price(
        &self,
        network: &str,
        token_address: &str,
    ) -> Result<Decimal, DataError> {
        let endpoint = format!(
            "/simple/networks/{network}/token_price/{}",
            urlencoding::encode(token_address)
        );
        let response: TokenPriceResponse = self.fetch(&endpoint, &[]).await?;
        response.price_for(token_address)
    }
}
