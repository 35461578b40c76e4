use crate::error::DomainError;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Significant digits a `Decimal` mantissa can always hold.
const DECIMAL_DIGITS: usize = 28;

/// Balances below 0.000001 are shown unrounded.
const SMALL_BALANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Balances below 0.1 are padded to the full display precision.
const FRACTIONAL_BALANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

const MAX_DISPLAY_DP: u32 = 9;
const MIN_DISPLAY_DP: usize = 2;

/// Integer token amount in the asset's smallest unit.
///
/// Serialized as a decimal string, the way chain nodes report balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RawBalance(pub U256);

impl RawBalance {
    /// Zero balance.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Parses a non-negative decimal integer string.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidRawBalance`] for empty, signed,
    /// fractional or overflowing input.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidRawBalance(s.to_string()));
        }
        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|_| DomainError::InvalidRawBalance(s.to_string()))
    }

    /// Returns true for a zero balance.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two balances, saturating at `U256::MAX`.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl FromStr for RawBalance {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for RawBalance {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for RawBalance {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl fmt::Display for RawBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RawBalance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RawBalance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A raw balance paired with its decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub raw: RawBalance,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: RawBalance, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Exact `raw / 10^decimals` in fixed-point form, trailing zeros trimmed.
    ///
    /// Works on the digit string, so any `U256` and any precision is exact.
    pub fn to_fixed_string(&self) -> String {
        let digits = self.raw.0.to_string();
        let scale = usize::from(self.decimals);
        if scale == 0 {
            return digits;
        }

        let (int_part, frac_part) = if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            (int_part.to_string(), frac_part.to_string())
        } else {
            (
                "0".to_string(),
                format!("{}{}", "0".repeat(scale - digits.len()), digits),
            )
        };

        let frac = frac_part.trim_end_matches('0');
        if frac.is_empty() {
            int_part
        } else {
            format!("{int_part}.{frac}")
        }
    }

    /// Numeric value as a `Decimal`.
    ///
    /// Fraction digits beyond the 28 significant digits a `Decimal` holds are
    /// truncated. Returns `None` when the integer part alone does not fit.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let fixed = self.to_fixed_string();
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        if int_part.len() > DECIMAL_DIGITS {
            return None;
        }

        let keep = (DECIMAL_DIGITS - int_part.len()).min(frac_part.len());
        let text = if keep == 0 {
            int_part.to_string()
        } else {
            format!("{int_part}.{}", &frac_part[..keep])
        };
        Decimal::from_str(&text).ok()
    }

    /// Like [`Amount::to_decimal`], saturating at `Decimal::MAX`.
    pub fn to_decimal_saturating(&self) -> Decimal {
        self.to_decimal().unwrap_or(Decimal::MAX)
    }

    /// Human readable balance.
    ///
    /// Balances below 0.000001 keep every significant digit. Larger ones are
    /// rounded to 9 fraction digits, showing all 9 below 0.1 and at least 2
    /// otherwise. Never uses scientific notation.
    pub fn display(&self) -> String {
        if self.raw.is_zero() {
            return "0".to_string();
        }

        match self.to_decimal() {
            Some(value) if value >= SMALL_BALANCE => {
                let min_dp = if value < FRACTIONAL_BALANCE {
                    MAX_DISPLAY_DP as usize
                } else {
                    MIN_DISPLAY_DP
                };
                pad_fraction(value.round_dp(MAX_DISPLAY_DP).normalize().to_string(), min_dp)
            }
            _ => self.to_fixed_string(),
        }
    }
}

fn pad_fraction(mut s: String, min_dp: usize) -> String {
    let frac_len = s.split_once('.').map(|(_, frac)| frac.len());
    match frac_len {
        Some(len) if len >= min_dp => {}
        Some(len) => s.push_str(&"0".repeat(min_dp - len)),
        None => {
            s.push('.');
            s.push_str(&"0".repeat(min_dp));
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(raw: &str, decimals: u8) -> Amount {
        Amount::new(RawBalance::parse(raw).unwrap(), decimals)
    }

    #[test]
    fn test_sui_balance_is_exact() {
        let a = amount("2500000000", 9);
        assert_eq!(a.to_decimal(), Some(dec!(2.5)));
        assert_eq!(a.to_fixed_string(), "2.5");
        assert_eq!(a.display(), "2.50");
    }

    #[test]
    fn test_tiny_balance_has_no_exponent() {
        let a = amount("1", 8);
        let shown = a.display();
        assert_eq!(shown, "0.00000001");
        assert!(!shown.contains('e') && !shown.contains('E'));
    }

    #[test]
    fn test_tiny_balance_beyond_decimal_scale() {
        let a = amount("15", 32);
        assert_eq!(a.display(), "0.00000000000000000000000000000015");
    }

    #[test]
    fn test_display_rounds_to_nine_places() {
        let a = amount("1234567891234", 12);
        assert_eq!(a.display(), "1.234567891");
    }

    #[test]
    fn test_display_pads_fractional_balances() {
        assert_eq!(amount("5", 2).display(), "0.050000000");
        assert_eq!(amount("1234567891", 10).display(), "0.123456789");
        assert_eq!(amount("12", 6).display(), "0.000012000");
        assert_eq!(amount("1", 1).display(), "0.10");
    }

    #[test]
    fn test_display_whole_and_zero() {
        assert_eq!(amount("1000", 0).display(), "1000.00");
        assert_eq!(amount("0", 9).display(), "0");
    }

    #[test]
    fn test_exceeds_u64_range() {
        let a = amount("340282366920938463463374607431768211455", 18);
        assert_eq!(a.to_fixed_string(), "340282366920938463463.374607431768211455");
        assert_eq!(
            a.to_decimal(),
            Some(Decimal::from_str("340282366920938463463.3746074").unwrap())
        );
    }

    #[test]
    fn test_integer_part_beyond_decimal_range() {
        let a = amount("340282366920938463463374607431768211455", 0);
        assert_eq!(a.to_decimal(), None);
        assert_eq!(a.to_decimal_saturating(), Decimal::MAX);
        assert_eq!(a.display(), "340282366920938463463374607431768211455");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RawBalance::parse("").is_err());
        assert!(RawBalance::parse("-5").is_err());
        assert!(RawBalance::parse("1.5").is_err());
        assert!(RawBalance::parse("12ab").is_err());
        assert_eq!(RawBalance::parse(" 42 ").unwrap(), RawBalance::from(42u64));
    }

    #[test]
    fn test_raw_balance_serializes_as_decimal_string() {
        let raw = RawBalance::from(2_500_000_000u64);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, "\"2500000000\"");
        let back: RawBalance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, raw);
    }
}
