//! HTTP implementations of the provider traits.

mod anthropic;
mod gecko_terminal;
mod sui_rpc;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use gecko_terminal::{GeckoTerminalConfig, GeckoTerminalProvider, Network, SUI_NETWORK};
pub use sui_rpc::{SuiRpcConfig, SuiRpcProvider};

use crate::error::DataError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Longest error body kept in [`DataError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Checks the status and decodes a JSON body into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, DataError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if status == StatusCode::NOT_FOUND {
        return Err(DataError::NotFound(url));
    }
    if !status.is_success() {
        let mut body = body;
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        return Err(DataError::Http {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| DataError::malformed(service, e))
}
