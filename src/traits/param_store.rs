//! Source of the governance-owned [`Params`].

use crate::config::Params;
use crate::error::AmmError;

/// Read/write access to the current parameter set.
///
/// The engine only calls [`get`](ParamStore::get), once at the start of
/// each operation, and never caches the result across calls.
pub trait ParamStore {
    /// Current parameters.
    fn get(&self) -> Params;

    /// Replaces the parameters.
    ///
    /// # Errors
    ///
    /// Implementations must reject parameters that fail
    /// [`Params::validate`] and keep the previous set.
    fn set(&mut self, params: Params) -> Result<(), AmmError>;
}
