use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selectable strategy that drives pool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Deepest liquidity.
    Conservative,
    /// Middle of the volume range.
    Moderate,
    /// Largest 24h price swing.
    Aggressive,
}

impl RiskTier {
    /// All tiers in display order.
    pub const ALL: [RiskTier; 3] = [
        RiskTier::Conservative,
        RiskTier::Moderate,
        RiskTier::Aggressive,
    ];

    /// Lowercase name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Conservative => "conservative",
            RiskTier::Moderate => "moderate",
            RiskTier::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskTier::Conservative),
            "moderate" => Ok(RiskTier::Moderate),
            "aggressive" => Ok(RiskTier::Aggressive),
            _ => Err(DomainError::UnknownRiskTier(s.to_string())),
        }
    }
}
