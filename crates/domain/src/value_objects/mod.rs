pub mod amount;
pub mod price;

pub use amount::{Amount, RawBalance};
pub use price::{PriceQuote, format_usd};
