//! Validated asset denomination.

use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmmError;

/// Prefix shared by every liquidity-token denom.
pub const LPT_PREFIX: &str = "lpt-";

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 128;

/// An asset name: one ASCII letter followed by 2 to 127 characters from
/// `[a-zA-Z0-9/:._-]`.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::Denom;
///
/// let btc = Denom::new("btc").expect("valid denom");
/// assert_eq!(btc.as_str(), "btc");
/// assert!(Denom::new("1btc").is_err());
/// assert!(Denom::lpt(7).is_lpt());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    /// Validates and wraps a denom string.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidDenom`] if the string breaks the naming
    /// rules.
    pub fn new(denom: impl Into<String>) -> crate::error::Result<Self> {
        let denom = denom.into();
        validate(&denom)?;
        Ok(Self(denom))
    }

    /// Wraps a compile-time constant known to satisfy the naming rules.
    pub(crate) fn known(denom: &'static str) -> Self {
        debug_assert!(validate(denom).is_ok());
        Self(denom.to_owned())
    }

    /// The liquidity-token denom for a pool sequence number: `lpt-{n}`.
    #[must_use]
    pub fn lpt(sequence: u64) -> Self {
        Self(format!("{LPT_PREFIX}{sequence}"))
    }

    /// Returns the denom as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is a liquidity-token denom (`lpt-{n}`).
    #[must_use]
    pub fn is_lpt(&self) -> bool {
        self.lpt_sequence().is_some()
    }

    /// Parses the sequence number out of an `lpt-{n}` denom.
    #[must_use]
    pub fn lpt_sequence(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(LPT_PREFIX)?;
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        digits.parse().ok()
    }
}

fn validate(denom: &str) -> crate::error::Result<()> {
    let bytes = denom.as_bytes();
    if !(MIN_LEN..=MAX_LEN).contains(&bytes.len()) {
        return Err(AmmError::InvalidDenom(format!(
            "{denom:?} must be {MIN_LEN} to {MAX_LEN} characters"
        )));
    }
    if !bytes[0].is_ascii_alphabetic() {
        return Err(AmmError::InvalidDenom(format!(
            "{denom:?} must start with a letter"
        )));
    }
    let allowed = |b: &u8| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-');
    if !bytes[1..].iter().all(allowed) {
        return Err(AmmError::InvalidDenom(format!(
            "{denom:?} contains characters outside [a-zA-Z0-9/:._-]"
        )));
    }
    Ok(())
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Denom {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Denom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for Denom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Denom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ibc_and_factory_denoms() {
        assert!(Denom::new("stake").is_ok());
        assert!(Denom::new("ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2").is_ok());
        assert!(Denom::new("factory/addr:sub.token_v2-x").is_ok());
    }

    #[test]
    fn rejects_bad_names() {
        assert!(Denom::new("").is_err());
        assert!(Denom::new("ab").is_err());
        assert!(Denom::new("9lives").is_err());
        assert!(Denom::new("has space").is_err());
        assert!(Denom::new("a".repeat(129)).is_err());
    }

    #[test]
    fn lpt_denoms() {
        let lpt = Denom::lpt(12);
        assert_eq!(lpt.as_str(), "lpt-12");
        assert_eq!(lpt.lpt_sequence(), Some(12));
        let Ok(plain) = Denom::new("lpt-abc") else {
            panic!("valid denom");
        };
        assert!(!plain.is_lpt());
        let Ok(padded) = Denom::new("lpt-01") else {
            panic!("valid denom");
        };
        assert!(!padded.is_lpt());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Denom>("\"btc\"").is_ok());
        assert!(serde_json::from_str::<Denom>("\"1btc\"").is_err());
    }
}
