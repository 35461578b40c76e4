use crate::entities::token::TokenDescriptor;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Swap fee assumed when estimating pool earnings (0.3%).
pub const ESTIMATED_FEE_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 3);

/// Position size used for the default earnings estimate.
pub const DEFAULT_INVESTMENT_USD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// 24h transaction activity of a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCounts {
    pub buys: u64,
    pub sells: u64,
    pub buyers: u64,
    pub sellers: u64,
}

/// Snapshot of one liquidity pool as reported by the market-data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub id: String,
    pub address: String,
    pub name: String,
    pub tvl_usd: Decimal,
    pub volume_24h_usd: Decimal,
    /// Signed percentage, e.g. `-3.2` for a 3.2% drop.
    pub price_change_24h_pct: Decimal,
    pub base_token_price_usd: Decimal,
    pub quote_token_price_usd: Decimal,
    pub transactions_24h: TransactionCounts,
    pub base_token: Option<TokenDescriptor>,
    pub quote_token: Option<TokenDescriptor>,
}

impl PoolRecord {
    /// Checks that USD metrics are non-negative.
    ///
    /// # Errors
    /// Returns [`DomainError::NegativeMetric`] naming the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let metrics = [
            ("tvl_usd", self.tvl_usd),
            ("volume_24h_usd", self.volume_24h_usd),
            ("base_token_price_usd", self.base_token_price_usd),
            ("quote_token_price_usd", self.quote_token_price_usd),
        ];
        for (field, value) in metrics {
            if value < Decimal::ZERO {
                return Err(DomainError::NegativeMetric { field, value });
            }
        }
        Ok(())
    }

    /// Case-insensitive address comparison.
    pub fn has_address(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address)
    }

    /// Magnitude of the 24h price move.
    pub fn price_swing_24h(&self) -> Decimal {
        self.price_change_24h_pct.abs()
    }

    /// Fees generated in a day, taking 24h volume at [`ESTIMATED_FEE_RATE`].
    pub fn estimated_daily_fees(&self) -> Decimal {
        self.volume_24h_usd.saturating_mul(ESTIMATED_FEE_RATE)
    }

    /// Share of a day's fees earned by a position of `investment_usd`,
    /// pro rata to TVL. `None` when the pool has no TVL.
    pub fn estimated_daily_earnings(&self, investment_usd: Decimal) -> Option<Decimal> {
        if self.tvl_usd.is_zero() {
            return None;
        }
        self.estimated_daily_fees()
            .checked_div(self.tvl_usd)?
            .checked_mul(investment_usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pool() -> PoolRecord {
        PoolRecord {
            id: "sui-network_0xabc".to_string(),
            address: "0xABC".to_string(),
            name: "WBTC / SUI".to_string(),
            tvl_usd: dec!(1000),
            volume_24h_usd: dec!(250),
            price_change_24h_pct: dec!(-4.5),
            base_token_price_usd: dec!(60000),
            quote_token_price_usd: dec!(1.2),
            transactions_24h: TransactionCounts::default(),
            base_token: None,
            quote_token: None,
        }
    }

    #[test]
    fn test_validate_accepts_negative_price_change() {
        assert!(pool().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_tvl() {
        let mut p = pool();
        p.tvl_usd = dec!(-1);
        assert_eq!(
            p.validate(),
            Err(DomainError::NegativeMetric {
                field: "tvl_usd",
                value: dec!(-1)
            })
        );
    }

    #[test]
    fn test_has_address_ignores_case() {
        assert!(pool().has_address("0xabc"));
        assert!(!pool().has_address("0xabd"));
    }

    #[test]
    fn test_estimated_daily_fees() {
        assert_eq!(pool().estimated_daily_fees(), dec!(0.75));
    }

    #[test]
    fn test_estimated_daily_earnings() {
        let mut p = pool();
        p.tvl_usd = dec!(2000000);
        p.volume_24h_usd = dec!(500000);
        // 1500 in fees over 2M TVL, on a 10k position
        assert_eq!(
            p.estimated_daily_earnings(DEFAULT_INVESTMENT_USD),
            Some(dec!(7.5))
        );
    }

    #[test]
    fn test_estimated_daily_earnings_without_tvl() {
        let mut p = pool();
        p.tvl_usd = Decimal::ZERO;
        assert_eq!(p.estimated_daily_earnings(DEFAULT_INVESTMENT_USD), None);
        assert_eq!(p.estimated_daily_fees(), dec!(0.75));
    }

    #[test]
    fn test_price_swing() {
        assert_eq!(pool().price_swing_24h(), dec!(4.5));
    }
}
