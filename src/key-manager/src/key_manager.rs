//! LSP6 key manager for a single ERC725 account, as an Arbitrum Stylus contract.
//!
//! The contract is the only owner of its target account. Controllers call `execute` directly or
//! have relayers submit their signed payloads through `executeRelayCall`; either way the payload
//! is checked against the controller's permissions stored on the target and then forwarded to
//! it. Permission logic lives in `key_manager_core`; this file binds it to storage and the ABI.

use alloc::vec::Vec;

use alloy_sol_types::sol;
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
    prelude::*,
};

use key_manager_core::{
    constants::{
        INTERFACE_ID_ERC1271, INTERFACE_ID_ERC165, INTERFACE_ID_LSP20_CALL_VERIFIER,
        INTERFACE_ID_LSP25, INTERFACE_ID_LSP6,
    },
    data_keys::{allowed_calls_key, allowed_data_keys_key},
    dispatcher, NonceLedger, PermissionStore,
};

use crate::errors::{revert_data, AlreadyInitialized, InvalidLSP6Target, KeyManagerErrors};

sol! {
    event PermissionsVerified(address indexed signer, uint256 indexed value, bytes4 indexed selector);
}

sol_storage! {
    #[entrypoint]
    pub struct KeyManager {
        /// ERC725 account this key manager owns. Zero until `initialize`.
        address target_account;

        /// Nested forwards in flight and the controller that started the innermost one.
        uint256 reentrancy_depth;
        address acting_controller;

        /// LSP25 counters, keyed by `composite_key(controller, channel)`.
        mapping(bytes32 => uint256) nonce_of;
    }
}

#[public]
impl KeyManager {
    /// One-time binding to the target account.
    pub fn initialize(&mut self, target: Address) -> Result<(), KeyManagerErrors> {
        let current = self.target_account.get();
        if current != Address::ZERO {
            return Err(KeyManagerErrors::AlreadyInitialized(AlreadyInitialized {
                target: current,
            }));
        }
        if target == Address::ZERO {
            return Err(KeyManagerErrors::InvalidLSP6Target(InvalidLSP6Target {}));
        }
        self.target_account.set(target);
        Ok(())
    }

    pub fn target(&self) -> Address {
        self.target_account.get()
    }

    #[payable]
    pub fn execute(&mut self, payload: Bytes) -> Result<Bytes, Vec<u8>> {
        let caller = self.vm().msg_sender();
        let value = self.vm().msg_value();
        dispatcher::execute(self, caller, value, &payload)
            .map(Bytes::from)
            .map_err(revert_data)
    }

    #[payable]
    pub fn execute_batch(
        &mut self,
        values: Vec<U256>,
        payloads: Vec<Bytes>,
    ) -> Result<Vec<Bytes>, Vec<u8>> {
        let caller = self.vm().msg_sender();
        let msg_value = self.vm().msg_value();
        let payloads: Vec<Vec<u8>> = payloads.into_iter().map(|p| p.0).collect();
        dispatcher::execute_batch(self, caller, msg_value, &values, &payloads)
            .map(|results| results.into_iter().map(Bytes::from).collect())
            .map_err(revert_data)
    }

    #[payable]
    pub fn execute_relay_call(
        &mut self,
        signature: Bytes,
        nonce: U256,
        validity_timestamps: U256,
        payload: Bytes,
    ) -> Result<Bytes, Vec<u8>> {
        let msg_value = self.vm().msg_value();
        dispatcher::execute_relay_call(
            self,
            msg_value,
            &signature,
            nonce,
            validity_timestamps,
            &payload,
        )
        .map(Bytes::from)
        .map_err(revert_data)
    }

    #[payable]
    pub fn execute_relay_call_batch(
        &mut self,
        signatures: Vec<Bytes>,
        nonces: Vec<U256>,
        validity_timestamps: Vec<U256>,
        values: Vec<U256>,
        payloads: Vec<Bytes>,
    ) -> Result<Vec<Bytes>, Vec<u8>> {
        let msg_value = self.vm().msg_value();
        let signatures: Vec<Vec<u8>> = signatures.into_iter().map(|s| s.0).collect();
        let payloads: Vec<Vec<u8>> = payloads.into_iter().map(|p| p.0).collect();
        dispatcher::execute_relay_call_batch(
            self,
            msg_value,
            &signatures,
            &nonces,
            &validity_timestamps,
            &values,
            &payloads,
        )
        .map(|results| results.into_iter().map(Bytes::from).collect())
        .map_err(revert_data)
    }

    /// LSP20: the target asks before running a call a controller made on it directly.
    ///
    /// Permissions are always read from the bound target, whatever `target_contract` says.
    /// Only a query from the target itself records the call as in flight.
    #[selector(name = "lsp20VerifyCall")]
    pub fn lsp20_verify_call(
        &mut self,
        _requestor: Address,
        _target_contract: Address,
        caller: Address,
        received_value: U256,
        call_data: Bytes,
    ) -> Result<FixedBytes<4>, Vec<u8>> {
        let msg_sender = self.vm().msg_sender();
        dispatcher::lsp20_verify_call(self, msg_sender, caller, received_value, &call_data)
            .map(FixedBytes)
            .map_err(revert_data)
    }

    /// LSP20: the target reports the call verified above has finished.
    #[selector(name = "lsp20VerifyCallResult")]
    pub fn lsp20_verify_call_result(
        &mut self,
        _call_hash: FixedBytes<32>,
        _call_result: Bytes,
    ) -> FixedBytes<4> {
        let msg_sender = self.vm().msg_sender();
        FixedBytes(dispatcher::lsp20_verify_call_result(self, msg_sender))
    }

    /// Next nonce of `from` on `channel_id`, packed as `channel << 128 | counter`.
    pub fn get_nonce(&self, from: Address, channel_id: u128) -> U256 {
        self.packed_nonce(from, channel_id)
    }

    /// ERC-1271 on behalf of the target: valid iff the signer holds SIGN.
    pub fn is_valid_signature(&self, data_hash: FixedBytes<32>, signature: Bytes) -> FixedBytes<4> {
        FixedBytes(dispatcher::is_valid_signature(self, data_hash, &signature))
    }

    pub fn get_permissions_for(&self, controller: Address) -> FixedBytes<32> {
        FixedBytes(self.get_permissions(controller).to_be_bytes())
    }

    pub fn get_allowed_calls_for(&self, controller: Address) -> Bytes {
        Bytes::from(self.get_data(allowed_calls_key(controller)))
    }

    #[selector(name = "getAllowedERC725YDataKeysFor")]
    pub fn get_allowed_erc725y_data_keys_for(&self, controller: Address) -> Bytes {
        Bytes::from(self.get_data(allowed_data_keys_key(controller)))
    }

    pub fn supports_interface(&self, interface_id: FixedBytes<4>) -> bool {
        [
            INTERFACE_ID_ERC165,
            INTERFACE_ID_ERC1271,
            INTERFACE_ID_LSP6,
            INTERFACE_ID_LSP25,
            INTERFACE_ID_LSP20_CALL_VERIFIER,
        ]
        .contains(&interface_id.0)
    }
}
