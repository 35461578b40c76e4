use rust_decimal::Decimal;

/// Errors raised while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Raw balance is not a non-negative decimal integer.
    #[error("invalid raw balance: {0:?}")]
    InvalidRawBalance(String),

    /// Risk tier string did not match a known tier.
    #[error("unknown risk tier: {0:?}")]
    UnknownRiskTier(String),

    /// A metric that must be non-negative was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeMetric {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },
}
