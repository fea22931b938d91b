use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::SolCall;
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

use key_manager_core::{
    constants::LSP25_VERSION,
    interfaces::{IERC725X, IERC725Y, ILSP14},
    CallRestriction, OperationType, Permissions,
};

use crate::types::RelayCall;

/// 32-byte big-endian value stored under `AddressPermissions:Permissions:<address>`.
pub fn encode_permissions(permissions: Permissions) -> Vec<u8> {
    permissions.to_be_bytes().to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A compact bytes array element does not fit its `uint16` length prefix.
    ElementTooLong(usize),
}

/// LSP2 compact bytes array: `uint16 length || bytes` per element.
pub fn encode_compact_bytes_array<T: AsRef<[u8]>>(elements: &[T]) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    for element in elements {
        let element = element.as_ref();
        let len = u16::try_from(element.len())
            .map_err(|_| EncodeError::ElementTooLong(element.len()))?;
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(element);
    }
    Ok(buf)
}

/// Entries are fixed 32-byte records, so this cannot overflow a length prefix.
pub fn encode_allowed_calls(calls: &[CallRestriction]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(calls.len() * 34);
    for call in calls {
        buf.extend_from_slice(&32u16.to_be_bytes());
        buf.extend_from_slice(&call.call_types.0.to_be_bytes());
        buf.extend_from_slice(call.target.as_slice());
        buf.extend_from_slice(&call.standard);
        buf.extend_from_slice(&call.selector);
    }
    buf
}

pub fn encode_allowed_data_keys(prefixes: &[&[u8]]) -> Result<Vec<u8>, EncodeError> {
    encode_compact_bytes_array(prefixes)
}

pub fn encode_set_data(key: FixedBytes<32>, value: Vec<u8>) -> Vec<u8> {
    IERC725Y::setDataCall {
        dataKey: key,
        dataValue: value.into(),
    }
    .abi_encode()
}

pub fn encode_set_data_batch(entries: Vec<(FixedBytes<32>, Vec<u8>)>) -> Vec<u8> {
    let (keys, values): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .map(|(key, value)| (key, value.into()))
        .unzip();
    IERC725Y::setDataBatchCall {
        dataKeys: keys,
        dataValues: values,
    }
    .abi_encode()
}

pub fn encode_execute(operation: OperationType, target: Address, value: U256, data: Vec<u8>) -> Vec<u8> {
    IERC725X::executeCall {
        operationType: operation.as_u256(),
        target,
        value,
        data: data.into(),
    }
    .abi_encode()
}

pub fn encode_transfer_ownership(new_owner: Address) -> Vec<u8> {
    ILSP14::transferOwnershipCall { newOwner: new_owner }.abi_encode()
}

pub fn encode_accept_ownership() -> Vec<u8> {
    ILSP14::acceptOwnershipCall {}.abi_encode()
}

pub fn encode_renounce_ownership() -> Vec<u8> {
    ILSP14::renounceOwnershipCall {}.abi_encode()
}

pub fn keccak256_bytes(bytes: &[u8]) -> FixedBytes<32> {
    let mut h = Keccak256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut b = [0u8; 32];
    b.copy_from_slice(out.as_slice());
    FixedBytes(b)
}

/// Digest a controller signs for a relay call (must match on-chain `RelayEnvelope::digest`).
pub fn relay_call_digest(call: &RelayCall) -> FixedBytes<32> {
    let mut message = Vec::with_capacity(32 * 5 + call.payload.len());
    message.extend_from_slice(&U256::from(LSP25_VERSION).to_be_bytes::<32>());
    message.extend_from_slice(&U256::from(call.chain_id).to_be_bytes::<32>());
    message.extend_from_slice(&call.nonce.to_be_bytes::<32>());
    message.extend_from_slice(&call.validity_timestamps.to_be_bytes::<32>());
    message.extend_from_slice(&call.value.to_be_bytes::<32>());
    message.extend_from_slice(&call.payload);

    // EIP-191 version 0x00: intended validator.
    let mut final_buf = Vec::with_capacity(2 + 20 + message.len());
    final_buf.extend_from_slice(b"\x19\x00");
    final_buf.extend_from_slice(call.key_manager.as_slice());
    final_buf.extend_from_slice(&message);
    keccak256_bytes(&final_buf)
}

/// Sign a 32-byte digest as `r || s || v` with `v` in {27, 28}.
pub fn sign_digest(digest: FixedBytes<32>, signing_key: &SigningKey) -> Result<Vec<u8>, k256::ecdsa::Error> {
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest.as_slice())?;
    // The key manager only accepts low-s signatures; flipping s flips the y parity.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let mut sig_bytes = Vec::with_capacity(65);
    sig_bytes.extend_from_slice(&signature.to_bytes());
    sig_bytes.push(27 + recovery_id.to_byte());
    Ok(sig_bytes)
}

/// Sign the relay digest and write the 65-byte signature into `call.signature`.
pub fn sign_relay_call(call: &mut RelayCall, signing_key: &SigningKey) -> Result<(), k256::ecdsa::Error> {
    call.signature = sign_digest(relay_call_digest(call), signing_key)?;
    Ok(())
}

/// Ethereum address of a public key: last 20 bytes of keccak256 of the uncompressed point.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256_bytes(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
