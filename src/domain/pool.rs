//! Pool record and its identifier.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Address, Denom};
use crate::error::AmmError;

/// 32-byte pool identifier, a digest of the counterparty denom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId([u8; 32]);

impl PoolId {
    /// Wraps raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for PoolId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| AmmError::InvalidGenesis(format!("pool id {s:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for PoolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PoolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A registered trading pair between the standard asset and one
/// counterparty asset.
///
/// Reserves are not stored here: they are the escrow account's ledger
/// balances.  Once created, none of these fields ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Digest of `counterparty_denom`.
    pub id: PoolId,
    /// Hub asset.
    pub standard_denom: Denom,
    /// Spoke asset; at most one pool exists per counterparty denom.
    pub counterparty_denom: Denom,
    /// Keyless account holding both reserves.
    pub escrow_address: Address,
    /// Liquidity-token denom, `lpt-{sequence}`.
    pub lpt_denom: Denom,
}
