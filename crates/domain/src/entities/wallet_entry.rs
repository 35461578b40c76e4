use crate::entities::token::TokenDescriptor;
use crate::value_objects::{Amount, PriceQuote, RawBalance, format_usd};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a wallet's balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTokenEntry {
    pub token: TokenDescriptor,
    pub raw_balance: RawBalance,
    /// `raw_balance / 10^decimals`.
    pub balance: Decimal,
    /// Fixed-point rendering of the balance.
    pub display_balance: String,
    pub price: PriceQuote,
    /// `balance * price`, zero when the price is unknown.
    pub usd_value: Decimal,
}

impl WalletTokenEntry {
    /// Builds an entry, deriving balance and value from the raw amount.
    pub fn new(token: TokenDescriptor, raw_balance: RawBalance, price: PriceQuote) -> Self {
        let amount = Amount::new(raw_balance, token.decimals);
        let balance = amount.to_decimal_saturating();
        Self {
            display_balance: amount.display(),
            usd_value: price.value_of(balance),
            token,
            raw_balance,
            balance,
            price,
        }
    }

    pub fn coin_type(&self) -> &str {
        &self.token.coin_type
    }

    pub fn symbol(&self) -> &str {
        &self.token.symbol
    }

    /// Formatted USD value, or `N/A` when the price is unknown.
    pub fn display_value(&self) -> String {
        if self.price.is_known() {
            format_usd(self.usd_value)
        } else {
            "N/A".to_string()
        }
    }
}
