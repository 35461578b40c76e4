//! Terminal tables.

use prettytable::{Table, row};
use riverr_data::providers::Network;
use riverr_domain::{Amount, PoolRecord, TokenDescriptor, format_usd};
use riverr_execution::{CoinHoldings, WalletSnapshot};
use rust_decimal::Decimal;

pub fn pools_table(pools: &[PoolRecord]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Pool", "Address", "TVL", "Volume 24h", "Change 24h", "Buys/Sells"]);
    for pool in pools {
        table.add_row(row![
            pool.name,
            short_address(&pool.address),
            r->format_usd(pool.tvl_usd),
            r->format_usd(pool.volume_24h_usd),
            r->format!("{}%", pool.price_change_24h_pct.round_dp(2)),
            r->format!("{}/{}", pool.transactions_24h.buys, pool.transactions_24h.sells)
        ]);
    }
    table
}

pub fn pool_details(pool: &PoolRecord) -> Table {
    let token = |t: &Option<TokenDescriptor>| {
        t.as_ref()
            .map_or_else(|| "-".to_string(), |t| format!("{} ({})", t.symbol, t.name))
    };
    let tx = &pool.transactions_24h;

    let mut table = Table::new();
    table.add_row(row!["Name", pool.name]);
    table.add_row(row!["Address", pool.address]);
    table.add_row(row!["TVL", format_usd(pool.tvl_usd)]);
    table.add_row(row!["Volume 24h", format_usd(pool.volume_24h_usd)]);
    table.add_row(row!["Price change 24h", format!("{}%", pool.price_change_24h_pct.round_dp(2))]);
    table.add_row(row!["Base token", token(&pool.base_token)]);
    table.add_row(row!["Quote token", token(&pool.quote_token)]);
    table.add_row(row!["Base price", format!("${}", pool.base_token_price_usd)]);
    table.add_row(row!["Quote price", format!("${}", pool.quote_token_price_usd)]);
    table.add_row(row![
        "Transactions 24h",
        format!(
            "{} buys / {} sells ({} buyers, {} sellers)",
            tx.buys, tx.sells, tx.buyers, tx.sellers
        )
    ]);
    table
}

/// Appends the fee and earnings estimates for a position of `investment_usd`.
pub fn add_earnings_estimate(table: &mut Table, pool: &PoolRecord, investment_usd: Decimal) {
    table.add_row(row!["Est. daily fees", format_usd(pool.estimated_daily_fees())]);
    table.add_row(row![
        format!("Est. daily earnings on {}", format_usd(investment_usd)),
        estimated_earnings(pool, investment_usd)
    ]);
}

fn estimated_earnings(pool: &PoolRecord, investment_usd: Decimal) -> String {
    pool.estimated_daily_earnings(investment_usd)
        .map_or_else(|| "N/A".to_string(), format_usd)
}

pub fn wallet_table(snapshot: &WalletSnapshot) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Token", "Balance", "Price", "Value"]);
    for entry in &snapshot.entries {
        table.add_row(row![
            entry.symbol(),
            r->entry.display_balance,
            r->entry.price,
            r->entry.display_value()
        ]);
    }
    table.add_row(row!["Total", "", "", r->format_usd(snapshot.total_usd)]);
    table
}

pub fn holdings_table(holdings: &CoinHoldings) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Coin object", "Balance"]);
    for coin in &holdings.coins {
        let amount = Amount::new(coin.balance, holdings.decimals);
        table.add_row(row![coin.coin_object_id, r->amount.to_fixed_string()]);
    }
    table.add_row(row!["Total", r->holdings.formatted_balance()]);
    table
}

pub fn networks_table(networks: &[Network]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Id", "Name"]);
    for network in networks {
        table.add_row(row![network.id, network.name]);
    }
    table
}

/// `0x1234…abcd` form for wide tables.
pub fn short_address(address: &str) -> String {
    let tail = address.len().saturating_sub(4);
    if address.len() <= 14 || !address.is_char_boundary(6) || !address.is_char_boundary(tail) {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[tail..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(tvl: Decimal, volume: Decimal) -> PoolRecord {
        PoolRecord {
            id: "sui-network_0xp".to_string(),
            address: "0xp".to_string(),
            name: "WBTC / SUI".to_string(),
            tvl_usd: tvl,
            volume_24h_usd: volume,
            price_change_24h_pct: Decimal::ZERO,
            base_token_price_usd: Decimal::ONE,
            quote_token_price_usd: Decimal::ONE,
            transactions_24h: Default::default(),
            base_token: None,
            quote_token: None,
        }
    }

    #[test]
    fn test_estimated_earnings() {
        let p = pool(Decimal::from(2_000_000), Decimal::from(500_000));
        assert_eq!(estimated_earnings(&p, Decimal::from(10_000)), "$7.50");
    }

    #[test]
    fn test_estimated_earnings_without_tvl() {
        let p = pool(Decimal::ZERO, Decimal::from(500_000));
        assert_eq!(estimated_earnings(&p, Decimal::from(10_000)), "N/A");

        let mut table = Table::new();
        add_earnings_estimate(&mut table, &p, Decimal::from(10_000));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0xe0c526aa27d1729931d0051a318d795ad0299998898e4287d9da1bf095b49658"),
            "0xe0c5…9658"
        );
        assert_eq!(short_address("0x2"), "0x2");
    }
}
