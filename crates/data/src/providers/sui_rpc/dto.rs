//! Sui JSON-RPC 2.0 envelopes and result shapes.

use crate::error::DataError;
use crate::models::{CoinBalance, CoinObject, CoinPage};
use riverr_domain::{RawBalance, TokenDescriptor};
use serde::{Deserialize, Serialize};

pub(super) const SERVICE: &str = "sui-rpc";

#[derive(Debug, Serialize)]
pub(super) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcResponse {
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BalanceDto {
    pub coin_type: String,
    pub total_balance: String,
}

impl BalanceDto {
    pub fn into_balance(self) -> Result<CoinBalance, DataError> {
        let total_balance = parse_raw(&self.total_balance)?;
        Ok(CoinBalance::new(self.coin_type, total_balance))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CoinMetadataDto {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl CoinMetadataDto {
    pub fn into_descriptor(self, coin_type: &str) -> TokenDescriptor {
        let token = TokenDescriptor::new(coin_type, self.name, self.symbol, self.decimals);
        match self.icon_url {
            Some(url) if !url.is_empty() => token.with_icon(url),
            _ => token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CoinPageDto {
    pub data: Vec<CoinDto>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CoinDto {
    pub coin_type: String,
    pub coin_object_id: String,
    pub balance: String,
}

impl CoinPageDto {
    pub fn into_page(self) -> Result<CoinPage, DataError> {
        let data = self
            .data
            .into_iter()
            .map(|coin| {
                Ok(CoinObject {
                    balance: parse_raw(&coin.balance)?,
                    coin_object_id: coin.coin_object_id,
                    coin_type: coin.coin_type,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(CoinPage {
            data,
            next_cursor: self.next_cursor,
            has_next_page: self.has_next_page,
        })
    }
}

fn parse_raw(value: &str) -> Result<RawBalance, DataError> {
    RawBalance::parse(value).map_err(|e| DataError::malformed(SERVICE, e))
}
