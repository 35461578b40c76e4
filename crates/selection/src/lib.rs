//! Risk-tier pool recommendations.
//!
//! [`PoolSelector`] holds the pure selection rules; [`PoolRecommender`]
//! fetches the candidate set from a market-data provider on every call and
//! applies them.

/// Known pool addresses.
pub mod addresses;
/// Ranking objectives.
pub mod objective;
/// Fetch-and-select service.
pub mod recommender;
/// Selection rules.
pub mod selector;

pub use addresses::{TierAnchors, pool_address_for_style};
pub use recommender::{PoolRecommender, RecommenderConfig};
pub use selector::PoolSelector;
