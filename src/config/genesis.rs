//! Genesis state: everything needed to rehydrate an engine.

use serde::{Deserialize, Serialize};

use super::params::{Params, DEFAULT_STANDARD_DENOM};
use crate::domain::{Denom, Pool};
use crate::error::AmmError;
use crate::pools::PoolRegistry;

/// Sequence number assigned to the first pool of a fresh chain.
pub const INITIAL_SEQUENCE: u64 = 1;

/// Serializable snapshot of the engine.
///
/// `sequence` is the *next* liquidity-token sequence to assign, so a
/// fresh chain starts at [`INITIAL_SEQUENCE`] and its first pool is
/// `lpt-1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Global parameters.
    pub params: Params,
    /// The hub asset every pool is paired with.
    pub standard_denom: Denom,
    /// Registered pools, in any order.
    pub pools: Vec<Pool>,
    /// Next pool sequence number.
    pub sequence: u64,
}

impl GenesisState {
    /// Checks params, the standard denom, and the pool list.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidParams`] if the params are invalid.
    /// - [`AmmError::InvalidGenesis`] if the standard denom is a liquidity
    ///   token or the pools do not form a consistent registry.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.params.validate()?;
        if self.standard_denom.is_lpt() {
            return Err(AmmError::InvalidGenesis(format!(
                "standard denom {} cannot be a liquidity token",
                self.standard_denom
            )));
        }
        if let Some(pool) = self
            .pools
            .iter()
            .find(|pool| pool.standard_denom != self.standard_denom)
        {
            return Err(AmmError::InvalidGenesis(format!(
                "pool {} is paired with {}, not the standard denom {}",
                pool.lpt_denom, pool.standard_denom, self.standard_denom
            )));
        }
        PoolRegistry::from_parts(self.pools.clone(), self.sequence).map(|_| ())
    }
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            standard_denom: Denom::known(DEFAULT_STANDARD_DENOM),
            pools: Vec::new(),
            sequence: INITIAL_SEQUENCE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::pools::registry;

    fn denom(s: &str) -> Denom {
        let Ok(d) = Denom::new(s) else {
            panic!("valid denom {s}");
        };
        d
    }

    fn pool(counterparty: &str, seq: u64) -> Pool {
        let lpt = registry::lpt_denom(seq);
        Pool {
            id: registry::pool_id(&denom(counterparty)),
            standard_denom: denom("stake"),
            counterparty_denom: denom(counterparty),
            escrow_address: registry::reserve_address(&lpt),
            lpt_denom: lpt,
        }
    }

    #[test]
    fn default_is_valid() {
        let genesis = GenesisState::default();
        assert!(genesis.validate().is_ok());
        assert_eq!(genesis.sequence, 1);
        assert_eq!(genesis.standard_denom.as_str(), "stake");
    }

    #[test]
    fn rejects_lpt_standard_denom() {
        let genesis = GenesisState {
            standard_denom: Denom::lpt(1),
            ..GenesisState::default()
        };
        assert!(matches!(genesis.validate(), Err(AmmError::InvalidGenesis(_))));
    }

    #[test]
    fn rejects_pool_with_foreign_standard() {
        let mut foreign = pool("btc", 1);
        foreign.standard_denom = denom("uatom");
        let genesis = GenesisState {
            pools: vec![foreign],
            sequence: 2,
            ..GenesisState::default()
        };
        assert!(matches!(genesis.validate(), Err(AmmError::InvalidGenesis(_))));
    }

    #[test]
    fn rejects_stale_sequence() {
        let genesis = GenesisState {
            pools: vec![pool("btc", 1), pool("eth", 2)],
            sequence: 2,
            ..GenesisState::default()
        };
        assert!(matches!(genesis.validate(), Err(AmmError::InvalidGenesis(_))));
    }

    #[test]
    fn json_round_trip() {
        let genesis = GenesisState {
            pools: vec![pool("btc", 1)],
            sequence: 2,
            ..GenesisState::default()
        };
        let Ok(json) = serde_json::to_string(&genesis) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<GenesisState>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, genesis);
        assert!(back.validate().is_ok());
    }
}
