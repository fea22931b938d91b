use alloy_primitives::{Address, U256};

/// LSP25 relay call as handed to a relayer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayCall {
    /// Packed `channel << 128 | counter`.
    pub nonce: U256,
    /// Packed `start << 128 | end`, zero for no window.
    pub validity_timestamps: U256,
    /// Value the relayer must attach; part of the signed message.
    pub value: U256,
    /// Calldata for the target account (`setData`, `execute`, ...).
    pub payload: Vec<u8>,

    /// ECDSA signature (r||s||v) over the intended-validator digest.
    pub signature: Vec<u8>,

    /// Domain binding: the signature is only valid for this chain and key manager.
    pub chain_id: u64,
    pub key_manager: Address,
}

impl RelayCall {
    pub fn new(key_manager: Address, chain_id: u64, nonce: U256, payload: Vec<u8>) -> Self {
        Self {
            nonce,
            validity_timestamps: U256::ZERO,
            value: U256::ZERO,
            payload,
            signature: Vec::new(),
            chain_id,
            key_manager,
        }
    }
}
