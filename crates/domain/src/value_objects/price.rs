use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// USD unit price of a token, or the "unknown" state when the lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "usd", rename_all = "snake_case")]
pub enum PriceQuote {
    Known(Decimal),
    Unknown,
}

impl PriceQuote {
    /// The price, if known.
    pub fn usd(&self) -> Option<Decimal> {
        match self {
            PriceQuote::Known(price) => Some(*price),
            PriceQuote::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, PriceQuote::Known(_))
    }

    /// USD value of `balance` units; zero when the price is unknown.
    pub fn value_of(&self, balance: Decimal) -> Decimal {
        match self {
            PriceQuote::Known(price) => balance.checked_mul(*price).unwrap_or(Decimal::MAX),
            PriceQuote::Unknown => Decimal::ZERO,
        }
    }
}

impl From<Option<Decimal>> for PriceQuote {
    fn from(price: Option<Decimal>) -> Self {
        price.map_or(PriceQuote::Unknown, PriceQuote::Known)
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Sub-cent tokens would all read $0.00 at two places.
            PriceQuote::Known(price) if *price < Decimal::new(1, 2) => {
                write!(f, "${}", price.round_dp(8).normalize())
            }
            PriceQuote::Known(price) => write!(f, "{}", format_usd(*price)),
            PriceQuote::Unknown => f.write_str("N/A"),
        }
    }
}

/// Formats a USD amount with two fraction digits, e.g. `$1234.50`.
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    match text.split_once('.').map(|(_, frac)| frac.len()) {
        Some(2) => format!("${text}"),
        Some(len) => format!("${text}{}", "0".repeat(2 - len)),
        None => format!("${text}.00"),
    }
}
