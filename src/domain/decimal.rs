//! Fixed-point decimal with 18 fractional digits.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmmError;

/// Number of fractional digits carried by [`Decimal`].
pub const DECIMAL_PRECISION: u32 = 18;

/// `10^DECIMAL_PRECISION`, the raw value of `1.0`.
pub const DECIMAL_SCALE: u128 = 1_000_000_000_000_000_000;

/// A non-negative fixed-point number stored as `raw / 10^18`.
///
/// Used for the swap fee and the tax rate.  Parsing accepts at most 18
/// fractional digits and never rounds; the textual form always prints
/// all 18 digits (`"0.003000000000000000"`).
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::Decimal;
///
/// let fee = Decimal::with_precision(3, 3).expect("0.003");
/// assert_eq!(fee.to_string(), "0.003000000000000000");
/// assert!(fee < Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(u128);

impl Decimal {
    /// `0.0`
    pub const ZERO: Self = Self(0);

    /// `1.0`
    pub const ONE: Self = Self(DECIMAL_SCALE);

    /// Wraps a raw value already scaled by `10^18`.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw value scaled by `10^18`.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Builds `value * 10^-precision`, e.g. `with_precision(3, 3) == 0.003`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `precision > 18`.
    /// - [`AmmError::Overflow`] if the scaled value does not fit.
    pub fn with_precision(value: u128, precision: u32) -> crate::error::Result<Self> {
        if precision > DECIMAL_PRECISION {
            return Err(AmmError::InvalidQuantity("decimal precision exceeds 18 digits"));
        }
        let factor = 10u128.pow(DECIMAL_PRECISION - precision);
        value
            .checked_mul(factor)
            .map(Self)
            .ok_or(AmmError::Overflow("decimal scaling overflow"))
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `1 - self`, or `None` if `self > 1`.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match DECIMAL_SCALE.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 / DECIMAL_SCALE;
        let frac = self.0 % DECIMAL_SCALE;
        write!(f, "{int}.{frac:018}")
    }
}

impl FromStr for Decimal {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !digits_only(int_part) || !digits_only(frac_part) {
            return Err(AmmError::InvalidParams(format!("malformed decimal {s:?}")));
        }
        if frac_part.len() > DECIMAL_PRECISION as usize {
            return Err(AmmError::InvalidParams(format!(
                "decimal {s:?} has more than {DECIMAL_PRECISION} fractional digits"
            )));
        }

        let int: u128 = int_part
            .parse()
            .map_err(|_| AmmError::Overflow("decimal integer part overflow"))?;
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            let padding = DECIMAL_PRECISION - frac_part.len() as u32;
            frac_part
                .parse::<u128>()
                .map_err(|_| AmmError::Overflow("decimal fraction overflow"))?
                * 10u128.pow(padding)
        };

        int.checked_mul(DECIMAL_SCALE)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or(AmmError::Overflow("decimal overflow"))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
