//! LSP25 replay protection: one counter per `(controller, channel)`.

use alloc::collections::BTreeMap;

use alloy_primitives::{Address, U256};

use crate::errors::KeyManagerError;

/// Split a packed `uint256` nonce into `(channel, counter)`.
pub fn split_nonce(packed: U256) -> (u128, u128) {
    let bytes = packed.to_be_bytes::<32>();
    let mut channel = [0u8; 16];
    let mut counter = [0u8; 16];
    channel.copy_from_slice(&bytes[..16]);
    counter.copy_from_slice(&bytes[16..]);
    (u128::from_be_bytes(channel), u128::from_be_bytes(counter))
}

/// `channel << 128 | counter`
pub fn pack_nonce(channel: u128, counter: u128) -> U256 {
    (U256::from(channel) << 128usize) | U256::from(counter)
}

/// Storage of the per-channel counters.
///
/// Only the raw load/store are host specific; the exact-match consumption rule lives in the
/// provided methods so every host applies it the same way.
pub trait NonceLedger {
    fn load_nonce(&self, controller: Address, channel: u128) -> u128;

    fn store_nonce(&mut self, controller: Address, channel: u128, counter: u128);

    fn get_nonce(&self, controller: Address, channel: u128) -> u128 {
        self.load_nonce(controller, channel)
    }

    /// Next nonce in its wire form.
    fn packed_nonce(&self, controller: Address, channel: u128) -> U256 {
        pack_nonce(channel, self.load_nonce(controller, channel))
    }

    /// Accept `presented` iff it equals the current counter, then advance the counter.
    fn consume(
        &mut self,
        controller: Address,
        channel: u128,
        presented: u128,
    ) -> Result<(), KeyManagerError> {
        let current = self.load_nonce(controller, channel);
        let invalid = KeyManagerError::InvalidRelayNonce {
            controller,
            channel,
            presented,
        };
        if presented != current {
            return Err(invalid);
        }
        let next = current.checked_add(1).ok_or(invalid)?;
        self.store_nonce(controller, channel, next);
        Ok(())
    }

    fn consume_packed(&mut self, controller: Address, packed: U256) -> Result<(), KeyManagerError> {
        let (channel, presented) = split_nonce(packed);
        self.consume(controller, channel, presented)
    }
}

/// Map-backed ledger for off-chain hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryNonceLedger {
    counters: BTreeMap<(Address, u128), u128>,
}

impl NonceLedger for MemoryNonceLedger {
    fn load_nonce(&self, controller: Address, channel: u128) -> u128 {
        self.counters.get(&(controller, channel)).copied().unwrap_or(0)
    }

    fn store_nonce(&mut self, controller: Address, channel: u128, counter: u128) {
        self.counters.insert((controller, channel), counter);
    }
}
