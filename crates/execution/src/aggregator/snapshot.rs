//! Aggregation results and progress.

use chrono::{DateTime, Utc};
use riverr_domain::WalletTokenEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the latest-triggered cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPhase {
    /// Nothing running: no cycle yet, wallet cleared, or the last cycle
    /// failed.
    Idle,
    /// Waiting for the balance list.
    FetchingBalances,
    /// Looking up coin metadata.
    ResolvingMetadata,
    /// Looking up USD prices.
    FetchingPrices,
    /// Building and ordering entries.
    ValuingAndSorting,
    /// Result installed; stays here until the next cycle.
    Published,
    /// The wallet holds no coins; an empty snapshot with a zero total was
    /// installed.
    Empty,
}

/// Priced holdings of one wallet, ordered by USD value descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Wallet address.
    pub address: String,
    /// Cycle that produced this snapshot.
    pub cycle: u64,
    /// Entries, highest value first.
    pub entries: Vec<WalletTokenEntry>,
    /// Sum of entry values.
    pub total_usd: Decimal,
    /// When the snapshot was built.
    pub refreshed_at: DateTime<Utc>,
}

impl WalletSnapshot {
    /// Builds a snapshot, ordering `entries` and summing their value.
    ///
    /// The sort is stable, so equal values keep their input order.
    pub fn new(address: impl Into<String>, cycle: u64, mut entries: Vec<WalletTokenEntry>) -> Self {
        entries.sort_by(|a, b| b.usd_value.cmp(&a.usd_value));
        let total_usd = entries
            .iter()
            .fold(Decimal::ZERO, |acc, entry| acc.saturating_add(entry.usd_value));
        Self {
            address: address.into(),
            cycle,
            entries,
            total_usd,
            refreshed_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose price could not be resolved.
    pub fn unpriced(&self) -> impl Iterator<Item = &WalletTokenEntry> {
        self.entries.iter().filter(|e| !e.price.is_known())
    }
}

/// Result of one aggregation cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// This cycle's snapshot is now the current one.
    Published(WalletSnapshot),
    /// A later cycle published first, or the wallet was cleared; the
    /// result was discarded.
    Superseded {
        /// The discarded cycle.
        cycle: u64,
    },
}

impl CycleOutcome {
    pub fn snapshot(&self) -> Option<&WalletSnapshot> {
        match self {
            Self::Published(snapshot) => Some(snapshot),
            Self::Superseded { .. } => None,
        }
    }

    pub fn into_snapshot(self) -> Option<WalletSnapshot> {
        match self {
            Self::Published(snapshot) => Some(snapshot),
            Self::Superseded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverr_domain::{PriceQuote, RawBalance, TokenDescriptor};
    use rust_decimal_macros::dec;

    fn entry(symbol: &str, raw: u64, price: PriceQuote) -> WalletTokenEntry {
        let token = TokenDescriptor::new(format!("0x1::{symbol}::{symbol}"), symbol, symbol, 0);
        WalletTokenEntry::new(token, RawBalance::from(raw), price)
    }

    #[test]
    fn test_new_orders_by_value_descending() {
        let snapshot = WalletSnapshot::new(
            "0xw",
            1,
            vec![
                entry("A", 30, PriceQuote::Known(dec!(1))),
                entry("B", 10, PriceQuote::Known(dec!(1))),
                entry("C", 50, PriceQuote::Known(dec!(1))),
            ],
        );
        let values: Vec<_> = snapshot.entries.iter().map(|e| e.usd_value).collect();
        assert_eq!(values, vec![dec!(50), dec!(30), dec!(10)]);
        assert_eq!(snapshot.total_usd, dec!(90));
    }

    #[test]
    fn test_unknown_prices_sort_as_zero_and_keep_order() {
        let snapshot = WalletSnapshot::new(
            "0xw",
            1,
            vec![
                entry("X", 5, PriceQuote::Unknown),
                entry("Y", 1, PriceQuote::Known(dec!(0))),
                entry("Z", 2, PriceQuote::Known(dec!(3))),
            ],
        );
        let symbols: Vec<_> = snapshot.entries.iter().map(|e| e.symbol()).collect();
        assert_eq!(symbols, vec!["Z", "X", "Y"]);
        assert_eq!(snapshot.unpriced().count(), 1);
    }
}
