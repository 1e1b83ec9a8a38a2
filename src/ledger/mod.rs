//! In-memory implementations of the host capabilities.
//!
//! [`MemoryLedger`] and [`MemoryParamStore`] back the test suite and the
//! demo, and suit hosts that embed the engine without a chain.  Both
//! honour the same contracts a production host must: all-or-nothing
//! multi-coin moves and validation on every parameter write.

mod memory;

pub use memory::{MemoryLedger, MemoryParamStore};
