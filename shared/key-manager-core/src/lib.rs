//! Shared key manager logic for the Stylus contract and its off-chain tooling.
//!
//! Everything in here is host-agnostic: storage reads go through [`PermissionStore`], replay
//! counters through [`NonceLedger`] and the outside world (target account, clock, signature
//! recovery) through [`Host`]. The contract crate implements these over Stylus storage and raw
//! calls; the encoder crate implements them in memory.

#![no_std]

extern crate alloc;

pub mod action;
pub mod allowed_calls;
pub mod allowed_keys;
pub mod compact;
pub mod constants;
pub mod context;
pub mod data_keys;
pub mod dispatcher;
pub mod errors;
pub mod evaluator;
pub mod host;
pub mod interfaces;
pub mod nonce;
pub mod permissions;
pub mod relay;
pub mod store;

#[cfg(test)]
mod testing;

pub use action::{decode_action, Action, ExecuteOp, OperationType};
pub use allowed_calls::{CallRestriction, CallTypes};
pub use allowed_keys::KeyPrefix;
pub use context::{ExecutionContext, ExecutionGuard};
pub use errors::{DecodeError, KeyManagerError};
pub use host::Host;
pub use nonce::{MemoryNonceLedger, NonceLedger};
pub use permissions::Permissions;
pub use relay::{has_low_s, RelayEnvelope, ValidityWindow};
pub use store::{Controllers, InterfaceDetector, PermissionStore};
