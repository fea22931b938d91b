//! Helpers that only make sense on-chain (precompiles, storage key derivation).

pub mod crypto;
pub mod keys;
