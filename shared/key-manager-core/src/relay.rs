//! LSP25 relay call envelope: message encoding, intended-validator digest and the validity
//! window.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

use crate::{
    constants::{LSP25_VERSION, SECP256K1N_HALF, SIGNATURE_LENGTH},
    errors::KeyManagerError,
};

/// `uint256 = startTimestamp << 128 | endTimestamp`. Zero halves are unchecked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidityWindow {
    pub start: u128,
    pub end: u128,
}

impl ValidityWindow {
    pub fn from_packed(packed: U256) -> Self {
        let (start, end) = crate::nonce::split_nonce(packed);
        Self { start, end }
    }

    pub fn packed(self) -> U256 {
        crate::nonce::pack_nonce(self.start, self.end)
    }

    /// Check `now` against both bounds; a zero bound is ignored.
    pub fn check(self, now: u64) -> Result<(), KeyManagerError> {
        let now = now as u128;
        if self.start > now {
            return Err(KeyManagerError::RelayCallBeforeStartTime);
        }
        if self.end != 0 && now > self.end {
            return Err(KeyManagerError::RelayCallExpired);
        }
        Ok(())
    }
}

/// Everything a controller signs for one relayed payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayEnvelope {
    pub chain_id: u64,
    pub nonce: U256,
    pub validity: U256,
    pub value: U256,
    pub payload: Vec<u8>,
}

impl RelayEnvelope {
    /// `abi.encodePacked(uint256 25, uint256 chainId, uint256 nonce, uint256 validity,
    /// uint256 value, bytes payload)`
    pub fn message(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(32 * 5 + self.payload.len());
        buf.extend_from_slice(&U256::from(LSP25_VERSION).to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(self.chain_id).to_be_bytes::<32>());
        buf.extend_from_slice(&self.nonce.to_be_bytes::<32>());
        buf.extend_from_slice(&self.validity.to_be_bytes::<32>());
        buf.extend_from_slice(&self.value.to_be_bytes::<32>());
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Digest the controller signs, bound to one key manager.
    pub fn digest(&self, key_manager: Address) -> FixedBytes<32> {
        intended_validator_digest(key_manager, &self.message())
    }
}

/// EIP-191 version 0: `keccak256(0x19 || 0x00 || validator || data)`.
pub fn intended_validator_digest(validator: Address, data: &[u8]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(2 + 20 + data.len());
    buf.extend_from_slice(&[0x19, 0x00]);
    buf.extend_from_slice(validator.as_slice());
    buf.extend_from_slice(data);
    keccak256(&buf)
}

/// True for a 65-byte `r || s || v` whose `s` lies in the lower half of the curve order.
/// The upper-half twin of a signature recovers the same signer, so only one form is accepted.
pub fn has_low_s(signature: &[u8]) -> bool {
    signature.len() == SIGNATURE_LENGTH && signature[32..64] <= SECP256K1N_HALF[..]
}
