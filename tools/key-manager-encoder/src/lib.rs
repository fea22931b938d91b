//! Off-chain side of the key manager: permission and calldata encoders, LSP25 relay-call
//! signing, and an in-memory account that runs the shared dispatcher end to end.

pub mod account;
pub mod encoder;
pub mod types;
