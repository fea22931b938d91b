use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    context::ExecutionContext,
    nonce::NonceLedger,
    store::{InterfaceDetector, PermissionStore},
};

/// Everything the dispatcher needs from the environment it runs in.
///
/// On-chain this is the contract itself (storage, raw calls, precompiles); off-chain it is an
/// in-memory account.
pub trait Host: PermissionStore + InterfaceDetector + NonceLedger {
    /// State snapshot restored when an invocation fails.
    type Checkpoint;

    /// Address of the key manager, the validator relay signatures are bound to.
    fn key_manager(&self) -> Address;

    /// Account the key manager controls. LSP20 verification only changes state when this
    /// account is the one asking.
    fn target(&self) -> Address;

    fn chain_id(&self) -> u64;

    fn block_timestamp(&self) -> u64;

    /// ECDSA recovery over a 32-byte digest. Never fails: unrecoverable input, including a
    /// signature whose `s` is in the upper half of the curve order, yields `Address::ZERO`.
    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8]) -> Address;

    /// Call the target with `payload` and `value`. `Err` carries the raw revert data.
    fn forward(&mut self, payload: &[u8], value: U256) -> Result<Vec<u8>, Vec<u8>>;

    fn execution_context(&self) -> ExecutionContext;

    fn set_execution_context(&mut self, context: ExecutionContext);

    fn checkpoint(&mut self) -> Self::Checkpoint;

    fn revert(&mut self, checkpoint: Self::Checkpoint);

    /// `PermissionsVerified(signer, value, selector)`, once per verified payload.
    fn permissions_verified(&mut self, _signer: Address, _value: U256, _selector: [u8; 4]) {}
}
