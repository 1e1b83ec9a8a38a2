//! Pool registry: identity derivation, the sequence counter, and the
//! two lookup indexes.
//!
//! Identity is fully determined by the counterparty denom and the
//! sequence number allocated at creation:
//!
//! ```text
//! id     = blake3("hydra-coinswap/pool/v1" || counterparty_denom)
//! lpt    = "lpt-{sequence}"
//! escrow = sha256(lpt)[..20]
//! ```

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{Address, Denom, Pool, PoolId};
use crate::error::AmmError;

const POOL_ID_DOMAIN: &[u8] = b"hydra-coinswap/pool/v1";

/// Deterministic pool id for a counterparty denom.
#[must_use]
pub fn pool_id(counterparty_denom: &Denom) -> PoolId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(POOL_ID_DOMAIN);
    hasher.update(counterparty_denom.as_str().as_bytes());
    PoolId::from_bytes(*hasher.finalize().as_bytes())
}

/// Keyless escrow account holding a pool's reserves.
#[must_use]
pub fn reserve_address(lpt_denom: &Denom) -> Address {
    Address::derive(lpt_denom.as_str().as_bytes())
}

/// Liquidity-token denom for a sequence number.
#[must_use]
pub fn lpt_denom(sequence: u64) -> Denom {
    Denom::lpt(sequence)
}

/// All registered pools, indexed by id and by liquidity-token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    pools: BTreeMap<PoolId, Pool>,
    by_sequence: BTreeMap<u64, PoolId>,
    sequence: u64,
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self {
            pools: BTreeMap::new(),
            by_sequence: BTreeMap::new(),
            sequence: crate::config::INITIAL_SEQUENCE,
        }
    }
}

impl PoolRegistry {
    /// Empty registry whose first pool will be `lpt-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a registry from exported pools and the next sequence.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidGenesis`] if `sequence` is zero, or any pool
    /// has a malformed liquidity-token denom, a sequence not below the
    /// counter, an id or escrow that does not match its derivation, or
    /// duplicates another pool's id or liquidity-token denom.
    pub fn from_parts(pools: Vec<Pool>, sequence: u64) -> Result<Self, AmmError> {
        if sequence == 0 {
            return Err(AmmError::InvalidGenesis("sequence must start at 1".to_owned()));
        }
        let mut registry = Self {
            pools: BTreeMap::new(),
            by_sequence: BTreeMap::new(),
            sequence,
        };
        for pool in pools {
            let seq = check_identity(&pool)?;
            if seq >= sequence {
                return Err(AmmError::InvalidGenesis(format!(
                    "pool {} is not below sequence {sequence}",
                    pool.lpt_denom
                )));
            }
            if registry.pools.contains_key(&pool.id) {
                return Err(AmmError::InvalidGenesis(format!(
                    "duplicate pool for {}",
                    pool.counterparty_denom
                )));
            }
            if registry.by_sequence.contains_key(&seq) {
                return Err(AmmError::InvalidGenesis(format!(
                    "duplicate liquidity denom {}",
                    pool.lpt_denom
                )));
            }
            registry.by_sequence.insert(seq, pool.id);
            registry.pools.insert(pool.id, pool);
        }
        Ok(registry)
    }

    /// Next sequence number to be assigned.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Pool by id.
    #[must_use]
    pub fn get_pool(&self, id: &PoolId) -> Option<&Pool> {
        self.pools.get(id)
    }

    /// Pool by liquidity-token denom.
    #[must_use]
    pub fn get_pool_by_lpt_denom(&self, lpt_denom: &str) -> Option<&Pool> {
        let seq = Denom::new(lpt_denom).ok()?.lpt_sequence()?;
        self.by_sequence
            .get(&seq)
            .and_then(|id| self.pools.get(id))
    }

    /// Pool by counterparty denom.
    #[must_use]
    pub fn get_pool_by_counterparty(&self, counterparty_denom: &Denom) -> Option<&Pool> {
        self.get_pool(&pool_id(counterparty_denom))
    }

    /// All pools in creation order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> + '_ {
        self.by_sequence.values().filter_map(|id| self.pools.get(id))
    }

    /// Computes the pool `create_pool` would register, without
    /// committing it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidDenom`] if the denoms are equal, the
    ///   counterparty is a liquidity token, or a pool already exists.
    /// - [`AmmError::Overflow`] if the sequence counter is exhausted.
    pub fn prepare_pool(
        &self,
        standard_denom: &Denom,
        counterparty_denom: &Denom,
    ) -> Result<Pool, AmmError> {
        if standard_denom == counterparty_denom {
            return Err(AmmError::InvalidDenom(format!(
                "{counterparty_denom} is the standard denom"
            )));
        }
        if counterparty_denom.is_lpt() {
            return Err(AmmError::InvalidDenom(format!(
                "liquidity token {counterparty_denom} cannot be pooled"
            )));
        }
        let id = pool_id(counterparty_denom);
        if self.pools.contains_key(&id) {
            return Err(AmmError::InvalidDenom(format!(
                "pool for {counterparty_denom} already exists"
            )));
        }
        if self.sequence == u64::MAX {
            return Err(AmmError::Overflow("pool sequence exhausted"));
        }
        let lpt = lpt_denom(self.sequence);
        Ok(Pool {
            id,
            standard_denom: standard_denom.clone(),
            counterparty_denom: counterparty_denom.clone(),
            escrow_address: reserve_address(&lpt),
            lpt_denom: lpt,
        })
    }

    /// Commits a pool produced by [`prepare_pool`](Self::prepare_pool)
    /// and advances the sequence.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidDenom`] if the pool was not prepared against
    /// the registry's current state.
    pub fn insert(&mut self, pool: Pool) -> Result<(), AmmError> {
        let expected = self.prepare_pool(&pool.standard_denom, &pool.counterparty_denom)?;
        if expected != pool {
            return Err(AmmError::InvalidDenom(format!(
                "pool {} is stale, next liquidity denom is {}",
                pool.lpt_denom, expected.lpt_denom
            )));
        }
        info!(
            pool_id = %pool.id,
            counterparty = %pool.counterparty_denom,
            lpt = %pool.lpt_denom,
            "pool created"
        );
        self.by_sequence.insert(self.sequence, pool.id);
        self.pools.insert(pool.id, pool);
        self.sequence += 1;
        Ok(())
    }

    /// Allocates a sequence and registers a new pool.
    ///
    /// # Errors
    ///
    /// As [`prepare_pool`](Self::prepare_pool).
    pub fn create_pool(
        &mut self,
        standard_denom: &Denom,
        counterparty_denom: &Denom,
    ) -> Result<Pool, AmmError> {
        let pool = self.prepare_pool(standard_denom, counterparty_denom)?;
        self.insert(pool.clone())?;
        Ok(pool)
    }
}

fn check_identity(pool: &Pool) -> Result<u64, AmmError> {
    let seq = pool.lpt_denom.lpt_sequence().ok_or_else(|| {
        AmmError::InvalidGenesis(format!("{} is not a liquidity denom", pool.lpt_denom))
    })?;
    if pool.counterparty_denom.is_lpt() || pool.counterparty_denom == pool.standard_denom {
        return Err(AmmError::InvalidGenesis(format!(
            "pool {} has invalid counterparty {}",
            pool.lpt_denom, pool.counterparty_denom
        )));
    }
    if pool.id != pool_id(&pool.counterparty_denom) {
        return Err(AmmError::InvalidGenesis(format!(
            "pool {} id does not match {}",
            pool.lpt_denom, pool.counterparty_denom
        )));
    }
    if pool.escrow_address != reserve_address(&pool.lpt_denom) {
        return Err(AmmError::InvalidGenesis(format!(
            "pool {} escrow address does not match",
            pool.lpt_denom
        )));
    }
    Ok(seq)
}
