/// Errors returned by the service clients.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Connection, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("{service} returned HTTP {status}: {body}")]
    Http {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response did not match the expected schema.
    #[error("malformed {service} response: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },

    /// The service has no such record.
    #[error("not found: {0}")]
    NotFound(String),

    /// JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DataError {
    pub(crate) fn malformed(service: &'static str, reason: impl ToString) -> Self {
        Self::Malformed {
            service,
            reason: reason.to_string(),
        }
    }

    /// True for "no such record", which callers treat as an empty result
    /// rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
