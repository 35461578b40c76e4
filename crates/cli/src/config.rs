//! Service settings, read from flags or the environment.

use clap::Args;
use riverr_data::providers::{AnthropicConfig, GeckoTerminalConfig, SuiRpcConfig};

/// Endpoints and credentials. Every flag falls back to its environment
/// variable, then to the client's built-in default.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// GeckoTerminal API base URL
    #[arg(long, env = "RIVERR_GECKO_BASE_URL", global = true)]
    pub gecko_base_url: Option<String>,

    /// GeckoTerminal network id
    #[arg(long, env = "RIVERR_NETWORK", global = true)]
    pub network: Option<String>,

    /// Sui full node JSON-RPC URL
    #[arg(long, env = "RIVERR_SUI_RPC_URL", global = true)]
    pub sui_rpc_url: Option<String>,

    /// Anthropic API key (chat only)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, global = true)]
    pub anthropic_api_key: Option<String>,

    /// Chat model
    #[arg(long, env = "RIVERR_CHAT_MODEL", global = true)]
    pub chat_model: Option<String>,

    /// Maximum tokens per chat reply
    #[arg(long, env = "RIVERR_CHAT_MAX_TOKENS", global = true)]
    pub chat_max_tokens: Option<u32>,

    /// Chat sampling temperature
    #[arg(long, env = "RIVERR_CHAT_TEMPERATURE", global = true)]
    pub chat_temperature: Option<f32>,
}

impl Settings {
    pub fn gecko_terminal(&self) -> GeckoTerminalConfig {
        let mut config = GeckoTerminalConfig::default();
        if let Some(url) = &self.gecko_base_url {
            config.base_url = url.clone();
        }
        if let Some(network) = &self.network {
            config.network = network.clone();
        }
        config
    }

    pub fn sui_rpc(&self) -> SuiRpcConfig {
        match &self.sui_rpc_url {
            Some(url) => SuiRpcConfig { url: url.clone() },
            None => SuiRpcConfig::default(),
        }
    }

    /// Chat settings.
    ///
    /// # Errors
    /// When no API key is configured.
    pub fn anthropic(&self) -> anyhow::Result<AnthropicConfig> {
        let key = self
            .anthropic_api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("ANTHROPIC_API_KEY must be set in .env or environment"))?;

        let mut config = AnthropicConfig::new(key);
        if let Some(model) = &self.chat_model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = self.chat_max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.chat_temperature {
            config.temperature = temperature;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Settings {
        Settings {
            gecko_base_url: None,
            network: None,
            sui_rpc_url: None,
            anthropic_api_key: None,
            chat_model: None,
            chat_max_tokens: None,
            chat_temperature: None,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = empty();
        assert_eq!(settings.gecko_terminal().network, "sui-network");
        assert_eq!(
            settings.sui_rpc().url,
            "https://fullnode.mainnet.sui.io:443"
        );
        assert!(settings.anthropic().is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            network: Some("sui-testnet".to_string()),
            anthropic_api_key: Some("key".to_string()),
            chat_max_tokens: Some(256),
            ..empty()
        };
        assert_eq!(settings.gecko_terminal().network, "sui-testnet");
        let chat = settings.anthropic().unwrap();
        assert_eq!(chat.max_tokens, 256);
        assert_eq!(chat.model, "claude-3-5-sonnet-20240620");
    }
}
