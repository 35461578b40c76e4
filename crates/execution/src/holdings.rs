//! Coin object holdings of one coin type, WBTC in particular.

use riverr_data::{ChainNodeProvider, CoinObject, DataError};
use riverr_domain::{Amount, RawBalance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Coin type of the bridged wrapped BTC.
pub const WBTC_COIN_TYPE: &str =
    "0x4528bbf3de06e0fa07691cdddad675b70d2c25acb4cdc12011cb87fc54ca0da4::wbtc::WBTC";

/// Decimals of [`WBTC_COIN_TYPE`].
pub const WBTC_DECIMALS: u8 = 8;

/// Coin objects requested per page.
const PAGE_LIMIT: u32 = 50;

/// All coin objects of one type held by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinHoldings {
    /// Owner address; `None` for a disconnected wallet.
    pub owner: Option<String>,
    pub coin_type: String,
    pub decimals: u8,
    pub coins: Vec<CoinObject>,
}

impl CoinHoldings {
    /// Holdings with no coins.
    pub fn empty(coin_type: impl Into<String>, decimals: u8) -> Self {
        Self {
            owner: None,
            coin_type: coin_type.into(),
            decimals,
            coins: Vec::new(),
        }
    }

    /// Sum of all coin balances.
    pub fn total_raw(&self) -> RawBalance {
        self.coins
            .iter()
            .fold(RawBalance::zero(), |acc, coin| acc.saturating_add(coin.balance))
    }

    pub fn total(&self) -> Amount {
        Amount::new(self.total_raw(), self.decimals)
    }

    /// Total with every fraction digit the coin supports, e.g. `0.15000000`.
    pub fn formatted_balance(&self) -> String {
        let fixed = self.total().to_fixed_string();
        let scale = usize::from(self.decimals);
        if scale == 0 {
            return fixed;
        }
        let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        format!("{int_part}.{frac:0<scale$}")
    }

    /// True when the total is at least `required` whole coins.
    pub fn has_minimum(&self, required: Decimal) -> bool {
        self.total().to_decimal_saturating() >= required
    }

    /// The coin object with the largest balance, first on ties.
    pub fn largest_coin(&self) -> Option<&CoinObject> {
        self.coins.iter().fold(None, |largest, coin| match largest {
            Some(best) if coin.balance <= best.balance => Some(best),
            _ => Some(coin),
        })
    }
}

/// Fetches every coin object of `coin_type` owned by `owner`, following
/// pagination to the end. A disconnected wallet (`None`) holds nothing.
///
/// # Errors
/// The first failing page request.
#[instrument(skip(chain))]
pub async fn fetch_holdings(
    chain: &dyn ChainNodeProvider,
    owner: Option<&str>,
    coin_type: &str,
    decimals: u8,
) -> Result<CoinHoldings, DataError> {
    let mut holdings = CoinHoldings::empty(coin_type, decimals);
    let Some(owner) = owner else {
        return Ok(holdings);
    };
    holdings.owner = Some(owner.to_string());

    let mut cursor: Option<String> = None;
    loop {
        let page = chain
            .get_coins(owner, coin_type, cursor.as_deref(), Some(PAGE_LIMIT))
            .await?;
        debug!(coins = page.data.len(), has_next = page.has_next_page, "Fetched coin page");
        holdings.coins.extend(page.data);

        match page.next_cursor {
            Some(next) if page.has_next_page => {
                if cursor.as_deref() == Some(next.as_str()) {
                    warn!(cursor = %next, "Node repeated a cursor, stopping pagination");
                    break;
                }
                cursor = Some(next);
            }
            _ => break,
        }
    }

    info!(
        owner = %owner,
        coins = holdings.coins.len(),
        balance = %holdings.formatted_balance(),
        "Holdings fetched"
    );
    Ok(holdings)
}

/// [`fetch_holdings`] for WBTC.
///
/// # Errors
/// See [`fetch_holdings`].
pub async fn fetch_wbtc_holdings(
    chain: &dyn ChainNodeProvider,
    owner: Option<&str>,
) -> Result<CoinHoldings, DataError> {
    fetch_holdings(chain, owner, WBTC_COIN_TYPE, WBTC_DECIMALS).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use riverr_data::{CoinBalance, CoinPage};
    use riverr_domain::TokenDescriptor;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    fn coin(id: &str, balance: u64) -> CoinObject {
        CoinObject {
            coin_object_id: id.to_string(),
            coin_type: WBTC_COIN_TYPE.to_string(),
            balance: RawBalance::from(balance),
        }
    }

    struct PagedChain {
        pages: Vec<CoinPage>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    impl PagedChain {
        fn new(pages: Vec<CoinPage>) -> Self {
            Self {
                pages,
                cursors: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChainNodeProvider for PagedChain {
        async fn get_all_balances(&self, _: &str) -> Result<Vec<CoinBalance>, DataError> {
            Ok(Vec::new())
        }

        async fn get_coin_metadata(&self, coin_type: &str) -> Result<TokenDescriptor, DataError> {
            Err(DataError::NotFound(coin_type.to_string()))
        }

        async fn get_coins(
            &self,
            _: &str,
            _: &str,
            cursor: Option<&str>,
            limit: Option<u32>,
        ) -> Result<CoinPage, DataError> {
            assert_eq!(limit, Some(PAGE_LIMIT));
            let mut cursors = self.cursors.lock().unwrap();
            cursors.push(cursor.map(str::to_string));
            self.pages
                .get(cursors.len() - 1)
                .cloned()
                .ok_or_else(|| DataError::Rpc {
                    code: -32000,
                    message: "no such page".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_fetch_follows_pagination() {
        let chain = PagedChain::new(vec![
            CoinPage {
                data: vec![coin("0xc1", 10_000_000), coin("0xc2", 5_000_000)],
                next_cursor: Some("page-2".to_string()),
                has_next_page: true,
            },
            CoinPage {
                data: vec![coin("0xc3", 1)],
                next_cursor: Some("0xc3".to_string()),
                has_next_page: false,
            },
        ]);

        let holdings = fetch_wbtc_holdings(&chain, Some("0xw")).await.unwrap();
        assert_eq!(holdings.coins.len(), 3);
        assert_eq!(holdings.total_raw(), RawBalance::from(15_000_001u64));
        assert_eq!(holdings.formatted_balance(), "0.15000001");
        assert_eq!(
            *chain.cursors.lock().unwrap(),
            vec![None, Some("page-2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_disconnected_wallet_holds_nothing() {
        let chain = PagedChain::new(Vec::new());
        let holdings = fetch_wbtc_holdings(&chain, None).await.unwrap();
        assert!(holdings.coins.is_empty());
        assert_eq!(holdings.formatted_balance(), "0.00000000");
        assert!(chain.cursors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let chain = PagedChain::new(Vec::new());
        let err = fetch_wbtc_holdings(&chain, Some("0xw")).await.unwrap_err();
        assert!(matches!(err, DataError::Rpc { code: -32000, .. }));
    }

    #[test]
    fn test_has_minimum() {
        let holdings = CoinHoldings {
            owner: Some("0xw".to_string()),
            coins: vec![coin("0xc1", 50_000_000)],
            ..CoinHoldings::empty(WBTC_COIN_TYPE, WBTC_DECIMALS)
        };
        assert!(holdings.has_minimum(dec!(0.5)));
        assert!(holdings.has_minimum(dec!(0.1)));
        assert!(!holdings.has_minimum(dec!(0.50000001)));
    }

    #[test]
    fn test_largest_coin_first_on_ties() {
        let holdings = CoinHoldings {
            coins: vec![coin("0xa", 3), coin("0xb", 9), coin("0xc", 9)],
            ..CoinHoldings::empty(WBTC_COIN_TYPE, WBTC_DECIMALS)
        };
        assert_eq!(holdings.largest_coin().unwrap().coin_object_id, "0xb");
        assert!(
            CoinHoldings::empty(WBTC_COIN_TYPE, WBTC_DECIMALS)
                .largest_coin()
                .is_none()
        );
    }
}
