use riverr_data::DataError;

/// Errors that abort an aggregation cycle.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// The balance list could not be fetched.
    #[error("failed to fetch balances for {address}: {source}")]
    Balances {
        address: String,
        #[source]
        source: DataError,
    },
}
