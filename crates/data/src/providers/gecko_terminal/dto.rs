//! Wire schema of the GeckoTerminal v2 API (JSON:API style).

use crate::error::DataError;
use riverr_domain::coin_type;
use riverr_domain::{PoolRecord, TokenDescriptor, TransactionCounts};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

pub(super) const SERVICE: &str = "geckoterminal";

/// Placeholder image the API returns for tokens without a logo.
const MISSING_IMAGE: &str = "missing.png";

#[derive(Debug, Deserialize)]
pub(super) struct PoolListResponse {
    pub data: Vec<PoolResource>,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

impl PoolListResponse {
    pub fn into_records(self) -> Result<Vec<PoolRecord>, DataError> {
        let tokens = index_tokens(self.included);
        self.data
            .into_iter()
            .map(|pool| pool.into_record(&tokens))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolResponse {
    pub data: PoolResource,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

impl PoolResponse {
    pub fn into_record(self) -> Result<PoolRecord, DataError> {
        let tokens = index_tokens(self.included);
        self.data.into_record(&tokens)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolResource {
    pub id: String,
    pub attributes: PoolAttributes,
    pub relationships: PoolRelationships,
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolAttributes {
    pub address: String,
    pub name: String,
    pub base_token_price_usd: String,
    pub quote_token_price_usd: String,
    pub reserve_in_usd: String,
    pub price_change_percentage: Windowed<String>,
    pub transactions: Windowed<TransactionWindow>,
    pub volume_usd: Windowed<String>,
}

/// Metrics bucketed by time window; only the 24h bucket is consumed.
#[derive(Debug, Deserialize)]
pub(super) struct Windowed<T> {
    pub h24: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionWindow {
    pub buys: u64,
    pub sells: u64,
    #[serde(default)]
    pub buyers: Option<u64>,
    #[serde(default)]
    pub sellers: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolRelationships {
    pub base_token: Relationship,
    pub quote_token: Relationship,
}

#[derive(Debug, Deserialize)]
pub(super) struct Relationship {
    pub data: ResourceRef,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResourceRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum IncludedResource {
    Token {
        id: String,
        attributes: TokenAttributes,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenAttributes {
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl TokenAttributes {
    fn into_descriptor(self) -> TokenDescriptor {
        let decimals = self
            .decimals
            .unwrap_or_else(|| coin_type::fallback_decimals(&self.address));
        let token = TokenDescriptor::new(self.address, self.name, self.symbol, decimals);
        match self.image_url {
            Some(url) if !url.is_empty() && url != MISSING_IMAGE => token.with_icon(url),
            _ => token,
        }
    }
}

fn index_tokens(included: Vec<IncludedResource>) -> HashMap<String, TokenDescriptor> {
    included
        .into_iter()
        .filter_map(|resource| match resource {
            IncludedResource::Token { id, attributes } => Some((id, attributes.into_descriptor())),
            IncludedResource::Other => None,
        })
        .collect()
}

impl PoolResource {
    fn into_record(self, tokens: &HashMap<String, TokenDescriptor>) -> Result<PoolRecord, DataError> {
        let attrs = self.attributes;
        let tx = attrs.transactions.h24;

        let record = PoolRecord {
            id: self.id,
            tvl_usd: parse_decimal("reserve_in_usd", &attrs.reserve_in_usd)?,
            volume_24h_usd: parse_decimal("volume_usd.h24", &attrs.volume_usd.h24)?,
            price_change_24h_pct: parse_decimal(
                "price_change_percentage.h24",
                &attrs.price_change_percentage.h24,
            )?,
            base_token_price_usd: parse_decimal("base_token_price_usd", &attrs.base_token_price_usd)?,
            quote_token_price_usd: parse_decimal(
                "quote_token_price_usd",
                &attrs.quote_token_price_usd,
            )?,
            transactions_24h: TransactionCounts {
                buys: tx.buys,
                sells: tx.sells,
                buyers: tx.buyers.unwrap_or_default(),
                sellers: tx.sellers.unwrap_or_default(),
            },
            base_token: tokens.get(&self.relationships.base_token.data.id).cloned(),
            quote_token: tokens.get(&self.relationships.quote_token.data.id).cloned(),
            address: attrs.address,
            name: attrs.name,
        };

        record
            .validate()
            .map_err(|e| DataError::malformed(SERVICE, format!("pool {}: {e}", record.address)))?;
        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenPriceResponse {
    pub data: TokenPriceResource,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenPriceResource {
    pub attributes: TokenPriceAttributes,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenPriceAttributes {
    pub token_prices: HashMap<String, Option<String>>,
}

impl TokenPriceResponse {
    /// Price keyed by `token_address`, or the only price in the response.
    pub fn price_for(self, token_address: &str) -> Result<Decimal, DataError> {
        let prices = self.data.attributes.token_prices;
        let value = prices
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(token_address))
            .or_else(|| {
                if prices.len() == 1 {
                    prices.iter().next()
                } else {
                    None
                }
            })
            .and_then(|(_, price)| price.as_deref());

        match value {
            Some(price) => parse_decimal("token_prices", price),
            None => Err(DataError::NotFound(format!("price for {token_address}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct NetworksResponse {
    pub data: Vec<NetworkResource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NetworkResource {
    pub id: String,
    pub attributes: NetworkAttributes,
}

#[derive(Debug, Deserialize)]
pub(super) struct NetworkAttributes {
    pub name: String,
}

/// Numeric strings may use plain or scientific notation.
fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DataError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DataError::malformed(SERVICE, format!("{field}: {value:?} is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_decimal("x", "12.5").unwrap(), dec!(12.5));
        assert_eq!(parse_decimal("x", "1.5e-7").unwrap(), dec!(0.00000015));
        assert!(parse_decimal("x", "n/a").is_err());
    }

    #[test]
    fn test_price_for_falls_back_to_single_entry() {
        let response: TokenPriceResponse = serde_json::from_str(
            r#"{"data":{"id":"x","type":"simple_token_price",
                "attributes":{"token_prices":{"0xABC::coin::COIN":"0.5"}}}}"#,
        )
        .unwrap();
        assert_eq!(response.price_for("0xabc::coin::COIN").unwrap(), dec!(0.5));
    }

    #[test]
    fn test_price_for_null_is_not_found() {
        let response: TokenPriceResponse = serde_json::from_str(
            r#"{"data":{"attributes":{"token_prices":{"0x1::a::A":null}}}}"#,
        )
        .unwrap();
        assert!(response.price_for("0x1::a::A").unwrap_err().is_not_found());
    }

    #[test]
    fn test_missing_image_is_dropped() {
        let token = TokenAttributes {
            address: "0x2::sui::SUI".to_string(),
            name: "Sui".to_string(),
            symbol: "SUI".to_string(),
            image_url: Some("missing.png".to_string()),
            decimals: None,
        }
        .into_descriptor();
        assert_eq!(token.icon_url, None);
        assert_eq!(token.decimals, 9);
    }
}
