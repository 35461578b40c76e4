//! Balance aggregation pipeline.

use super::snapshot::{AggregationPhase, CycleOutcome, WalletSnapshot};
use crate::error::AggregationError;
use crate::value_cell::{WalletValuePublisher, WalletValueReader};
use futures::future::join_all;
use riverr_data::providers::SUI_NETWORK;
use riverr_data::{ChainNodeProvider, CoinBalance, MarketDataProvider};
use riverr_domain::{PriceQuote, TokenDescriptor, WalletTokenEntry};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, instrument, warn};

/// Configuration for [`WalletBalanceAggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Market-data network used for price lookups.
    pub network: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            network: SUI_NETWORK.to_string(),
        }
    }
}

/// Latest installed result.
#[derive(Debug, Default)]
struct Installed {
    /// Highest cycle that published or cleared.
    cycle: u64,
    snapshot: Option<WalletSnapshot>,
}

/// Builds priced, sorted balance snapshots for a wallet.
///
/// Each [`refresh`](Self::refresh) is a cycle numbered in trigger order. A
/// cycle only installs its snapshot if no later cycle has installed one (or
/// cleared the wallet) first, so a slow stale cycle can never overwrite a
/// newer result.
pub struct WalletBalanceAggregator {
    /// Chain node for balances and metadata.
    chain: Arc<dyn ChainNodeProvider>,
    /// Market data for prices.
    market: Arc<dyn MarketDataProvider>,
    /// Configuration.
    config: AggregatorConfig,
    /// Sole writer of the wallet total.
    value: WalletValuePublisher,
    /// Phase of the latest-triggered cycle.
    phase: watch::Sender<AggregationPhase>,
    /// Last cycle number handed out.
    cycles: AtomicU64,
    /// Current snapshot.
    installed: Mutex<Installed>,
}

impl WalletBalanceAggregator {
    /// Creates an aggregator that owns `value` as the wallet total's writer.
    pub fn new(
        chain: Arc<dyn ChainNodeProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: AggregatorConfig,
        value: WalletValuePublisher,
    ) -> Self {
        let (phase, _) = watch::channel(AggregationPhase::Idle);
        Self {
            chain,
            market,
            config,
            value,
            phase,
            cycles: AtomicU64::new(0),
            installed: Mutex::new(Installed::default()),
        }
    }

    /// Reader of the published wallet total.
    pub fn value_reader(&self) -> WalletValueReader {
        self.value.subscribe()
    }

    /// Watches the latest-triggered cycle's phase.
    pub fn phase(&self) -> watch::Receiver<AggregationPhase> {
        self.phase.subscribe()
    }

    /// Currently installed snapshot, if any.
    pub async fn snapshot(&self) -> Option<WalletSnapshot> {
        self.installed.lock().await.snapshot.clone()
    }

    /// Refreshes for `address`, or clears when the wallet is disconnected.
    ///
    /// # Errors
    /// See [`refresh`](Self::refresh).
    pub async fn sync_wallet(
        &self,
        address: Option<&str>,
    ) -> Result<Option<CycleOutcome>, AggregationError> {
        match address {
            Some(address) => self.refresh(address).await.map(Some),
            None => {
                self.clear().await;
                Ok(None)
            }
        }
    }

    /// Drops the current snapshot and publishes a zero total.
    ///
    /// Cycles triggered before the clear can no longer publish.
    pub async fn clear(&self) {
        let cycle = self.next_cycle();
        let mut installed = self.installed.lock().await;
        installed.cycle = installed.cycle.max(cycle);
        installed.snapshot = None;
        self.value.publish(Decimal::ZERO);
        self.set_phase(cycle, AggregationPhase::Idle);
        info!(cycle = cycle, "Wallet cleared");
    }

    /// Runs one aggregation cycle for `address`.
    ///
    /// Metadata and price failures are absorbed per item: the coin gets a
    /// fallback descriptor or an unknown price. Only the balance fetch is
    /// fatal.
    ///
    /// # Errors
    /// [`AggregationError::Balances`] when the balance list cannot be fetched.
    #[instrument(skip(self), fields(cycle = tracing::field::Empty))]
    pub async fn refresh(&self, address: &str) -> Result<CycleOutcome, AggregationError> {
        let cycle = self.next_cycle();
        tracing::Span::current().record("cycle", cycle);

        self.set_phase(cycle, AggregationPhase::FetchingBalances);
        let balances = match self.chain.get_all_balances(address).await {
            Ok(balances) => balances,
            Err(source) => {
                error!(address = %address, error = %source, "Balance fetch failed");
                self.fail(cycle, address).await;
                return Err(AggregationError::Balances {
                    address: address.to_string(),
                    source,
                });
            }
        };

        if balances.is_empty() {
            debug!(address = %address, "Wallet holds no coins");
            return Ok(self.install(cycle, WalletSnapshot::new(address, cycle, Vec::new())).await);
        }

        self.set_phase(cycle, AggregationPhase::ResolvingMetadata);
        let resolved = self.resolve_metadata(&balances).await;

        self.set_phase(cycle, AggregationPhase::FetchingPrices);
        let prices = self.resolve_prices(&resolved).await;
        let tokens: HashMap<&str, &TokenDescriptor> = resolved
            .iter()
            .map(|token| (token.coin_type.as_str(), token))
            .collect();

        self.set_phase(cycle, AggregationPhase::ValuingAndSorting);
        let entries = balances
            .into_iter()
            .map(|balance| {
                let token = tokens
                    .get(balance.coin_type.as_str())
                    .map(|token| (*token).clone())
                    .unwrap_or_else(|| TokenDescriptor::fallback(&balance.coin_type));
                let price = prices
                    .get(&token.symbol)
                    .copied()
                    .unwrap_or(PriceQuote::Unknown);
                WalletTokenEntry::new(token, balance.total_balance, price)
            })
            .collect();

        Ok(self.install(cycle, WalletSnapshot::new(address, cycle, entries)).await)
    }

    /// Metadata per distinct coin type in balance order, with fallbacks for
    /// failed lookups.
    async fn resolve_metadata(&self, balances: &[CoinBalance]) -> Vec<TokenDescriptor> {
        let mut seen = HashSet::new();
        let coin_types: Vec<&str> = balances
            .iter()
            .map(|b| b.coin_type.as_str())
            .filter(|coin_type| seen.insert(*coin_type))
            .collect();

        let lookups = coin_types.iter().map(|coin_type| async move {
            match self.chain.get_coin_metadata(coin_type).await {
                Ok(token) => token,
                Err(e) => {
                    warn!(coin_type = %coin_type, error = %e, "Metadata unavailable, using fallback");
                    TokenDescriptor::fallback(coin_type)
                }
            }
        });

        join_all(lookups).await
    }

    /// One price lookup per distinct symbol, keyed by the first coin type
    /// carrying it.
    async fn resolve_prices(&self, tokens: &[TokenDescriptor]) -> HashMap<String, PriceQuote> {
        let mut by_symbol: Vec<(&str, &str)> = Vec::new();
        for token in tokens {
            if !by_symbol.iter().any(|(symbol, _)| *symbol == token.symbol) {
                by_symbol.push((&token.symbol, &token.coin_type));
            }
        }

        let network = self.config.network.as_str();
        let lookups = by_symbol.iter().map(|(symbol, coin_type)| async move {
            match self.market.get_token_price(network, coin_type).await {
                Ok(price) => PriceQuote::Known(price),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Price unavailable");
                    PriceQuote::Unknown
                }
            }
        });

        join_all(lookups)
            .await
            .into_iter()
            .zip(&by_symbol)
            .map(|(price, (symbol, _))| (symbol.to_string(), price))
            .collect()
    }

    /// Installs `snapshot` unless a later cycle already has.
    async fn install(&self, cycle: u64, snapshot: WalletSnapshot) -> CycleOutcome {
        let mut installed = self.installed.lock().await;
        if installed.cycle > cycle {
            debug!(
                cycle = cycle,
                current = installed.cycle,
                "Discarding superseded cycle"
            );
            return CycleOutcome::Superseded { cycle };
        }

        installed.cycle = cycle;
        installed.snapshot = Some(snapshot.clone());
        self.value.publish(snapshot.total_usd);
        let phase = if snapshot.is_empty() {
            AggregationPhase::Empty
        } else {
            AggregationPhase::Published
        };
        self.set_phase(cycle, phase);
        info!(
            address = %snapshot.address,
            cycle = cycle,
            tokens = snapshot.entries.len(),
            total_usd = %snapshot.total_usd,
            "Wallet snapshot published"
        );
        CycleOutcome::Published(snapshot)
    }

    /// Records a failed cycle so that older in-flight cycles can no longer
    /// install. A snapshot of another wallet is dropped and the total reset;
    /// the last good snapshot of `address` is kept.
    async fn fail(&self, cycle: u64, address: &str) {
        let mut installed = self.installed.lock().await;
        if installed.cycle > cycle {
            return;
        }
        installed.cycle = cycle;
        if installed
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.address != address)
        {
            installed.snapshot = None;
            self.value.publish(Decimal::ZERO);
        }
        self.set_phase(cycle, AggregationPhase::Idle);
    }

    fn next_cycle(&self) -> u64 {
        self.cycles.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Phase updates only come from the latest-triggered cycle.
    fn set_phase(&self, cycle: u64, phase: AggregationPhase) {
        if self.cycles.load(Ordering::SeqCst) == cycle {
            self.phase.send_replace(phase);
        }
    }
}
