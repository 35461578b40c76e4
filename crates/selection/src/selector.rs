use crate::addresses::TierAnchors;
use crate::objective::{MaximizePriceSwing, MaximizeTvl, PoolObjective, Volume24h};
use riverr_domain::{PoolRecord, RiskTier};
use tracing::debug;

/// Deterministic pool choice per risk tier.
#[derive(Debug, Clone, Default)]
pub struct PoolSelector {
    anchors: TierAnchors,
}

impl PoolSelector {
    pub fn new(anchors: TierAnchors) -> Self {
        Self { anchors }
    }

    pub fn anchors(&self) -> &TierAnchors {
        &self.anchors
    }

    /// Picks one pool for `tier`, or `None` for an empty set.
    ///
    /// The tier's anchor address wins when present. Otherwise:
    /// conservative takes the first pool with the highest TVL, moderate the
    /// element at `len / 2` of a stable ascending sort by 24h volume, and
    /// aggressive the first pool with the largest absolute 24h price change.
    #[must_use]
    pub fn select<'a>(&self, tier: RiskTier, pools: &'a [PoolRecord]) -> Option<&'a PoolRecord> {
        let anchor = self.anchors.address_for(tier);
        if let Some(pool) = pools.iter().find(|p| p.has_address(anchor)) {
            debug!(tier = %tier, address = %pool.address, "Anchor pool present");
            return Some(pool);
        }

        let chosen = match tier {
            RiskTier::Conservative => MaximizeTvl.first_max(pools),
            RiskTier::Moderate => Volume24h.midpoint(pools),
            RiskTier::Aggressive => MaximizePriceSwing.first_max(pools),
        };
        if let Some(pool) = chosen {
            debug!(tier = %tier, address = %pool.address, "Selected by rule");
        }
        chosen
    }

    /// Like [`select`](Self::select) but keyed by a free-form style string.
    ///
    /// `None` selects nothing; an unrecognized style yields the first pool.
    #[must_use]
    pub fn select_for_style<'a>(
        &self,
        style: Option<&str>,
        pools: &'a [PoolRecord],
    ) -> Option<&'a PoolRecord> {
        let style = style?;
        match style.parse::<RiskTier>() {
            Ok(tier) => self.select(tier, pools),
            Err(_) => pools.first(),
        }
    }
}
