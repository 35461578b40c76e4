//! Domain model for Riverr.
//!
//! Pools, tokens and wallet entries as they flow between the market-data
//! and chain-node clients, the pool selector and the wallet aggregator.

/// Coin type identifier helpers.
pub mod coin_type;
/// Core entities.
pub mod entities;
/// Enumerations.
pub mod enums;
/// Error types.
pub mod error;
/// Value objects.
pub mod value_objects;

pub use entities::{
    DEFAULT_INVESTMENT_USD, ESTIMATED_FEE_RATE, PoolRecord, TokenDescriptor, TransactionCounts,
    WalletTokenEntry,
};
pub use enums::RiskTier;
pub use error::DomainError;
pub use value_objects::{Amount, PriceQuote, RawBalance, format_usd};
