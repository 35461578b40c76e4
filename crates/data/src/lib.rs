//! Clients for the services Riverr depends on.
//!
//! This crate provides:
//! - [`MarketDataProvider`]: pool snapshots and spot token prices
//!   (GeckoTerminal)
//! - [`ChainNodeProvider`]: balances, coin metadata and coin objects
//!   (Sui JSON-RPC)
//! - [`ChatProvider`]: single-turn completions over a resent history
//!   (Anthropic Messages API)
//!
//! Responses are validated here and converted into `riverr_domain` types;
//! nothing loosely typed leaves this crate.

/// Chat turn types.
pub mod chat;
/// Error types.
pub mod error;
/// Chain-node records.
pub mod models;
/// HTTP provider implementations.
pub mod providers;

pub use chat::{ChatRole, ChatTurn};
pub use error::DataError;
pub use models::{CoinBalance, CoinObject, CoinPage};

use async_trait::async_trait;
use riverr_domain::{PoolRecord, TokenDescriptor};
use rust_decimal::Decimal;

/// Source of pool snapshots and token prices.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches snapshots for the given pool addresses on `network`.
    ///
    /// # Errors
    /// Transport, HTTP and schema failures.
    async fn get_pools(
        &self,
        network: &str,
        addresses: &[String],
    ) -> Result<Vec<PoolRecord>, DataError>;

    /// Fetches the USD spot price of one token.
    ///
    /// # Errors
    /// [`DataError::NotFound`] when the service has no price for the token.
    async fn get_token_price(&self, network: &str, token_address: &str)
    -> Result<Decimal, DataError>;
}

/// Read access to a chain node.
#[async_trait]
pub trait ChainNodeProvider: Send + Sync {
    /// All coin balances owned by `owner`, one entry per coin type.
    async fn get_all_balances(&self, owner: &str) -> Result<Vec<CoinBalance>, DataError>;

    /// Metadata of a coin type.
    ///
    /// # Errors
    /// [`DataError::NotFound`] when the node has no metadata for it.
    async fn get_coin_metadata(&self, coin_type: &str) -> Result<TokenDescriptor, DataError>;

    /// One page of coin objects of `coin_type` owned by `owner`.
    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<CoinPage, DataError>;
}

/// Stateless chat completion: the caller resends the whole conversation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the assistant's reply to `turns`.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<ChatTurn, DataError>;
}
