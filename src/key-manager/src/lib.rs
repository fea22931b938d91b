//! LSP6 key manager contract for Arbitrum Stylus.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod errors;
mod host;
pub mod key_manager;
pub mod utils;

pub use key_manager::KeyManager;
