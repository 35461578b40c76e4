use riverr_domain::RawBalance;
use serde::{Deserialize, Serialize};

/// Total balance of one coin type held by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    pub coin_type: String,
    pub total_balance: RawBalance,
}

impl CoinBalance {
    pub fn new(coin_type: impl Into<String>, total_balance: RawBalance) -> Self {
        Self {
            coin_type: coin_type.into(),
            total_balance,
        }
    }
}

/// A single coin object, as needed to build transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinObject {
    pub coin_object_id: String,
    pub coin_type: String,
    pub balance: RawBalance,
}

/// One page of coin objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinPage {
    pub data: Vec<CoinObject>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}
