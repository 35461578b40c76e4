use riverr_domain::RiskTier;
use serde::{Deserialize, Serialize};

/// WBTC/SUI pool, 0.30% fee.
pub const WBTC_SUI_POOL_1: &str =
    "0xe0c526aa27d1729931d0051a318d795ad0299998898e4287d9da1bf095b49658";
/// WBTC/SUI pool, 0.25% fee.
pub const WBTC_SUI_POOL_2: &str =
    "0x0fb4ad0e4c2c2b0a45d3f7bc5585cc9cea8486a63e4ef5cb768ddd9414fbb97a";
/// SUI pool 3.
pub const SUI_POOL_3: &str = "0xd7d53e235c8a1db5e30bbde563053490db9b876ec8752b9053fee33ed845843b";
/// SUI pool, 0.10% fee.
pub const SUI_POOL_4: &str = "0xe71aa89df60e737f1b687f8dfbd51e2a9b35706e9e5540ce9b053bd53fcb9ec3";

/// Pools fetched as recommendation candidates.
pub const CANDIDATE_POOLS: [&str; 4] = [WBTC_SUI_POOL_1, WBTC_SUI_POOL_2, SUI_POOL_3, SUI_POOL_4];

/// Preferred pool per tier, used whenever it is among the candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAnchors {
    pub conservative: String,
    pub moderate: String,
    pub aggressive: String,
}

impl TierAnchors {
    pub fn address_for(&self, tier: RiskTier) -> &str {
        match tier {
            RiskTier::Conservative => &self.conservative,
            RiskTier::Moderate => &self.moderate,
            RiskTier::Aggressive => &self.aggressive,
        }
    }
}

impl Default for TierAnchors {
    fn default() -> Self {
        Self {
            conservative: SUI_POOL_4.to_string(),
            moderate: WBTC_SUI_POOL_2.to_string(),
            aggressive: WBTC_SUI_POOL_1.to_string(),
        }
    }
}

/// Pool address to deposit into for a portfolio style.
///
/// Unset or unrecognized styles map to WBTC/SUI pool 1.
pub fn pool_address_for_style(style: Option<&str>) -> &'static str {
    match style.map(str::parse::<RiskTier>) {
        Some(Ok(RiskTier::Conservative)) => SUI_POOL_4,
        Some(Ok(RiskTier::Moderate)) => WBTC_SUI_POOL_2,
        _ => WBTC_SUI_POOL_1,
    }
}
