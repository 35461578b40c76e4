//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use riverr_execution::prelude::*;
//! ```

// Aggregation
pub use crate::aggregator::{
    AggregationPhase, AggregatorConfig, CycleOutcome, WalletBalanceAggregator, WalletSnapshot,
};
pub use crate::error::AggregationError;
pub use crate::value_cell::{WalletValuePublisher, WalletValueReader, wallet_value_cell};

// Holdings
pub use crate::holdings::{
    CoinHoldings, WBTC_COIN_TYPE, WBTC_DECIMALS, fetch_holdings, fetch_wbtc_holdings,
};

// Chat
pub use crate::chat::{APOLOGY_REPLY, ChatSession, DEFAULT_CONTEXT_PROMPT};
