//! Wallet-side services of the Riverr dashboard.
//!
//! This crate provides:
//! - [`WalletBalanceAggregator`]: priced, sorted balance snapshots per wallet
//! - The wallet value cell: a single-writer observable USD total
//! - WBTC holdings lookups over paginated coin objects
//! - [`ChatSession`]: conversation state around a chat provider

/// Prelude module for convenient imports.
pub mod prelude;

/// Wallet balance aggregation.
pub mod aggregator;
/// Chat conversation state.
pub mod chat;
/// Error types.
pub mod error;
/// Coin object holdings.
pub mod holdings;
/// Observable wallet total.
pub mod value_cell;

pub use aggregator::{
    AggregationPhase, AggregatorConfig, CycleOutcome, WalletBalanceAggregator, WalletSnapshot,
};
pub use chat::ChatSession;
pub use error::AggregationError;
pub use holdings::CoinHoldings;
pub use value_cell::{WalletValuePublisher, WalletValueReader, wallet_value_cell};
