//! In-crate host for unit tests.
//!
//! Signatures are not real ECDSA here: a "signature" is `signer || digest || 13 zero bytes` and
//! recovers `signer` only when the embedded digest matches.

use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};

use alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    action::{decode_action, Action},
    context::ExecutionContext,
    host::Host,
    nonce::{MemoryNonceLedger, NonceLedger},
    store::{InterfaceDetector, PermissionStore},
};

pub const KEY_MANAGER: Address = Address::new([0x6b; 20]);
pub const ACCOUNT: Address = Address::new([0xac; 20]);

#[derive(Clone, Default)]
pub struct TestState {
    pub data: BTreeMap<FixedBytes<32>, Vec<u8>>,
    pub nonces: MemoryNonceLedger,
    pub forwarded: Vec<(Vec<u8>, U256)>,
    pub events: Vec<(Address, U256, [u8; 4])>,
}

#[derive(Default)]
pub struct TestHost {
    pub state: TestState,
    pub interfaces: BTreeSet<(Address, [u8; 4])>,
    pub context: ExecutionContext,
    pub now: u64,
    /// Revert data returned by every forward when set.
    pub revert_with: Option<Vec<u8>>,
}

pub fn fake_signature(signer: Address, digest: FixedBytes<32>) -> Vec<u8> {
    let mut sig = Vec::with_capacity(65);
    sig.extend_from_slice(signer.as_slice());
    sig.extend_from_slice(digest.as_slice());
    sig.resize(65, 0);
    sig
}

impl TestHost {
    pub fn set(&mut self, key: FixedBytes<32>, value: Vec<u8>) {
        self.state.data.insert(key, value);
    }
}

impl PermissionStore for TestHost {
    fn get_data(&self, key: FixedBytes<32>) -> Vec<u8> {
        self.state.data.get_data(key)
    }
}

impl InterfaceDetector for TestHost {
    fn supports_interface(&self, account: Address, interface_id: [u8; 4]) -> bool {
        self.interfaces.contains(&(account, interface_id))
    }
}

impl NonceLedger for TestHost {
    fn load_nonce(&self, controller: Address, channel: u128) -> u128 {
        self.state.nonces.load_nonce(controller, channel)
    }

    fn store_nonce(&mut self, controller: Address, channel: u128, counter: u128) {
        self.state.nonces.store_nonce(controller, channel, counter)
    }
}

impl Host for TestHost {
    type Checkpoint = TestState;

    fn key_manager(&self) -> Address {
        KEY_MANAGER
    }

    fn target(&self) -> Address {
        ACCOUNT
    }

    fn chain_id(&self) -> u64 {
        42
    }

    fn block_timestamp(&self) -> u64 {
        self.now
    }

    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8]) -> Address {
        if signature.len() != 65 || signature[20..52] != digest[..] {
            return Address::ZERO;
        }
        Address::from_slice(&signature[..20])
    }

    fn forward(&mut self, payload: &[u8], value: U256) -> Result<Vec<u8>, Vec<u8>> {
        if let Some(data) = &self.revert_with {
            return Err(data.clone());
        }
        if let Ok(Action::SetData(entries)) = decode_action(payload) {
            self.state.data.extend(entries);
        }
        self.state.forwarded.push((payload.to_vec(), value));
        Ok(Vec::new())
    }

    fn execution_context(&self) -> ExecutionContext {
        self.context
    }

    fn set_execution_context(&mut self, context: ExecutionContext) {
        self.context = context;
    }

    fn checkpoint(&mut self) -> TestState {
        self.state.clone()
    }

    fn revert(&mut self, checkpoint: TestState) {
        self.state = checkpoint;
    }

    fn permissions_verified(&mut self, signer: Address, value: U256, selector: [u8; 4]) {
        self.state.events.push((signer, value, selector));
    }
}
