use riverr_domain::PoolRecord;
use rust_decimal::Decimal;

/// Scores a pool for ranking.
pub trait PoolObjective {
    fn evaluate(&self, pool: &PoolRecord) -> Decimal;

    /// First pool with the highest score.
    fn first_max<'a>(&self, pools: &'a [PoolRecord]) -> Option<&'a PoolRecord> {
        let mut best: Option<(&PoolRecord, Decimal)> = None;
        for pool in pools {
            let score = self.evaluate(pool);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((pool, score)),
            }
        }
        best.map(|(pool, _)| pool)
    }

    /// Element at index `len / 2` after a stable ascending sort by score.
    fn midpoint<'a>(&self, pools: &'a [PoolRecord]) -> Option<&'a PoolRecord> {
        let mut ranked: Vec<&PoolRecord> = pools.iter().collect();
        ranked.sort_by_key(|pool| self.evaluate(pool));
        ranked.get(ranked.len() / 2).copied()
    }
}

pub struct MaximizeTvl;
impl PoolObjective for MaximizeTvl {
    fn evaluate(&self, pool: &PoolRecord) -> Decimal {
        pool.tvl_usd
    }
}

pub struct Volume24h;
impl PoolObjective for Volume24h {
    fn evaluate(&self, pool: &PoolRecord) -> Decimal {
        pool.volume_24h_usd
    }
}

/// Absolute 24h price change, in either direction.
pub struct MaximizePriceSwing;
impl PoolObjective for MaximizePriceSwing {
    fn evaluate(&self, pool: &PoolRecord) -> Decimal {
        pool.price_swing_24h()
    }
}
