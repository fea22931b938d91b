use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{keccak256, Address, FixedBytes};

/// Storage key of a nonce channel = keccak256(controller || channel).
pub fn composite_key(controller: Address, channel: u128) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(20 + 16);
    buf.extend_from_slice(controller.as_slice());
    buf.extend_from_slice(&channel.to_be_bytes());
    keccak256(buf)
}
