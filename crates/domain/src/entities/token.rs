use crate::coin_type;
use serde::{Deserialize, Serialize};

/// Metadata for one coin type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// On-chain type identifier, unique per token.
    pub coin_type: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon_url: Option<String>,
}

impl TokenDescriptor {
    pub fn new(
        coin_type: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            coin_type: coin_type.into(),
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            icon_url: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Descriptor used when a coin type's metadata could not be fetched.
    ///
    /// Name and symbol come from the last segment of the type identifier;
    /// decimals are 9 for the native coin and 0 otherwise.
    pub fn fallback(coin_type: &str) -> Self {
        let name = coin_type::display_name(coin_type);
        Self::new(
            coin_type,
            name,
            name,
            coin_type::fallback_decimals(coin_type),
        )
    }
}
