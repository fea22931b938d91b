//! Binds the core traits to contract storage, the target account and EVM precompiles.

use alloc::vec::Vec;

use alloy_sol_types::SolCall;
use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    call::RawCall,
    prelude::*,
    stylus_core::log,
};

use key_manager_core::{
    interfaces::{IERC165, IERC725Y},
    ExecutionContext, Host, InterfaceDetector, NonceLedger, PermissionStore,
};

use crate::{
    key_manager::{KeyManager, PermissionsVerified},
    utils::{crypto::ecrecover_address, keys::composite_key},
};

/// ERC-165 caps `supportsInterface` at 30k gas.
const SUPPORTS_INTERFACE_GAS: u64 = 30_000;

impl PermissionStore for KeyManager {
    /// `getData` on the target; a failed call or undecodable return reads as empty.
    fn get_data(&self, key: FixedBytes<32>) -> Vec<u8> {
        let input = IERC725Y::getDataCall { dataKey: key }.abi_encode();
        let target = self.target_account.get();
        let Ok(out) = (unsafe { RawCall::new_static().call(target, &input) }) else {
            return Vec::new();
        };
        IERC725Y::getDataCall::abi_decode_returns(&out, true)
            .map(|ret| ret.dataValue.to_vec())
            .unwrap_or_default()
    }
}

impl InterfaceDetector for KeyManager {
    fn supports_interface(&self, account: Address, interface_id: [u8; 4]) -> bool {
        let input = IERC165::supportsInterfaceCall {
            interfaceId: FixedBytes(interface_id),
        }
        .abi_encode();
        let out = unsafe {
            RawCall::new_static()
                .gas(SUPPORTS_INTERFACE_GAS)
                .call(account, &input)
        };
        match out {
            Ok(out) => IERC165::supportsInterfaceCall::abi_decode_returns(&out, true)
                .map(|ret| ret._0)
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

impl NonceLedger for KeyManager {
    fn load_nonce(&self, controller: Address, channel: u128) -> u128 {
        self.nonce_of
            .get(composite_key(controller, channel))
            .saturating_to::<u128>()
    }

    fn store_nonce(&mut self, controller: Address, channel: u128, counter: u128) {
        self.nonce_of
            .insert(composite_key(controller, channel), U256::from(counter));
    }
}

impl Host for KeyManager {
    /// EVM reverts undo everything on error, nothing to snapshot.
    type Checkpoint = ();

    fn key_manager(&self) -> Address {
        self.vm().contract_address()
    }

    fn target(&self) -> Address {
        self.target_account.get()
    }

    fn chain_id(&self) -> u64 {
        self.vm().chain_id()
    }

    fn block_timestamp(&self) -> u64 {
        self.vm().block_timestamp()
    }

    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8]) -> Address {
        ecrecover_address(digest, signature)
    }

    fn forward(&mut self, payload: &[u8], value: U256) -> Result<Vec<u8>, Vec<u8>> {
        let target = self.target_account.get();
        // The target may call back into `execute`; storage must be flushed first.
        unsafe {
            RawCall::new_with_value(value)
                .flush_storage_cache()
                .call(target, payload)
        }
    }

    fn execution_context(&self) -> ExecutionContext {
        ExecutionContext {
            controller: self.acting_controller.get(),
            depth: self.reentrancy_depth.get().saturating_to::<u32>(),
        }
    }

    fn set_execution_context(&mut self, context: ExecutionContext) {
        self.acting_controller.set(context.controller);
        self.reentrancy_depth.set(U256::from(context.depth));
    }

    fn checkpoint(&mut self) {}

    fn revert(&mut self, _checkpoint: ()) {}

    fn permissions_verified(&mut self, signer: Address, value: U256, selector: [u8; 4]) {
        log(
            self.vm(),
            PermissionsVerified {
                signer,
                value,
                selector: FixedBytes(selector),
            },
        );
    }
}
