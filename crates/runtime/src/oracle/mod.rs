//! Runtime implementations of the session-side oracle traits.
//!
//! `progression-core` declares what it needs from the session layer
//! ([`progression_core::IdentityOracle`]); the implementations here keep that
//! data in memory so hosts can feed it from join/quit events.
mod identity;

pub use identity::IdentityOracleImpl;
