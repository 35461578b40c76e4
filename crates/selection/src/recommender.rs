use crate::addresses::CANDIDATE_POOLS;
use crate::selector::PoolSelector;
use riverr_data::{DataError, MarketDataProvider};
use riverr_data::providers::SUI_NETWORK;
use riverr_domain::{PoolRecord, RiskTier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Which pools are candidates and where they live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Market-data network id.
    pub network: String,
    /// Pool addresses fetched on every recommendation.
    pub candidates: Vec<String>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            network: SUI_NETWORK.to_string(),
            candidates: CANDIDATE_POOLS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Fetches the candidate pools and picks one per risk tier.
///
/// Nothing is cached: every call hits the market-data provider.
pub struct PoolRecommender {
    market: Arc<dyn MarketDataProvider>,
    config: RecommenderConfig,
    selector: PoolSelector,
}

impl PoolRecommender {
    pub fn new(market: Arc<dyn MarketDataProvider>, config: RecommenderConfig) -> Self {
        Self::with_selector(market, config, PoolSelector::default())
    }

    pub fn with_selector(
        market: Arc<dyn MarketDataProvider>,
        config: RecommenderConfig,
        selector: PoolSelector,
    ) -> Self {
        Self {
            market,
            config,
            selector,
        }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Fetches fresh snapshots of all candidate pools.
    ///
    /// # Errors
    /// Any provider failure; no stale result is returned in its place.
    pub async fn candidate_pools(&self) -> Result<Vec<PoolRecord>, DataError> {
        self.market
            .get_pools(&self.config.network, &self.config.candidates)
            .await
    }

    /// Recommends one pool for `tier`; `None` when no candidate came back.
    ///
    /// # Errors
    /// Any provider failure.
    #[instrument(skip(self), fields(network = %self.config.network))]
    pub async fn recommend(&self, tier: RiskTier) -> Result<Option<PoolRecord>, DataError> {
        let pools = self.candidate_pools().await?;
        let chosen = self.selector.select(tier, &pools).cloned();
        log_choice(tier.as_str(), pools.len(), chosen.as_ref());
        Ok(chosen)
    }

    /// Recommends by style string. An unset style fetches nothing.
    ///
    /// # Errors
    /// Any provider failure.
    #[instrument(skip(self), fields(network = %self.config.network))]
    pub async fn recommend_for_style(
        &self,
        style: Option<&str>,
    ) -> Result<Option<PoolRecord>, DataError> {
        let Some(style) = style else {
            return Ok(None);
        };
        let pools = self.candidate_pools().await?;
        let chosen = self.selector.select_for_style(Some(style), &pools).cloned();
        log_choice(style, pools.len(), chosen.as_ref());
        Ok(chosen)
    }
}

fn log_choice(style: &str, candidates: usize, chosen: Option<&PoolRecord>) {
    match chosen {
        Some(pool) => info!(
            style = style,
            candidates = candidates,
            address = %pool.address,
            name = %pool.name,
            "Pool recommended"
        ),
        None => info!(style = style, candidates = candidates, "No pool to recommend"),
    }
}
