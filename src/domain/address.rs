//! Ledger account address.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::AmmError;

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte ledger account identifier.
///
/// Keyless accounts (pool escrows, module accounts) are derived with
/// [`Address::derive`]: the first 20 bytes of `sha256(seed)`.  No private
/// key corresponds to a derived address, so only the engine's own ledger
/// calls can move funds out of it.
///
/// Displayed and serialized as 40 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::Address;
///
/// let vault = Address::derive(b"lpt-1");
/// assert_eq!(vault, Address::derive(b"lpt-1"));
/// assert_ne!(vault, Address::derive(b"lpt-2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Deterministic keyless address: `sha256(seed)[..20]`.
    #[must_use]
    pub fn derive(seed: &[u8]) -> Self {
        let digest = Sha256::digest(seed);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Address of a named module account (e.g. the fee collector).
    #[must_use]
    pub fn module(name: &str) -> Self {
        Self::derive(name.as_bytes())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s).map_err(|e| AmmError::InvalidAddress(format!("{s:?}: {e}")))?;
        let bytes: [u8; ADDRESS_LEN] = raw.try_into().map_err(|_| {
            AmmError::InvalidAddress(format!("{s:?}: expected {ADDRESS_LEN} bytes"))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
