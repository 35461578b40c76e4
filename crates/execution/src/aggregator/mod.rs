//! Wallet balance aggregation.

mod balance;
mod snapshot;

pub use balance::{AggregatorConfig, WalletBalanceAggregator};
pub use snapshot::{AggregationPhase, CycleOutcome, WalletSnapshot};
