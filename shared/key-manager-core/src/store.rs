use alloc::{collections::BTreeMap, vec::Vec};

use alloy_primitives::{Address, FixedBytes};

use crate::{
    allowed_calls::{decode_allowed_calls, CallRestriction},
    allowed_keys::{decode_allowed_keys, KeyPrefix},
    data_keys::{
        allowed_calls_key, allowed_data_keys_key, controller_index_key, permissions_key,
        CONTROLLERS_ARRAY_KEY,
    },
    errors::DecodeError,
    permissions::Permissions,
};

/// Read-only view over the target account's ERC725Y storage.
///
/// Implementors only provide `get_data`; everything else is derived from it. A missing key
/// reads as an empty value.
pub trait PermissionStore {
    fn get_data(&self, key: FixedBytes<32>) -> Vec<u8>;

    fn get_permissions(&self, controller: Address) -> Permissions {
        Permissions::from_stored(&self.get_data(permissions_key(controller)))
    }

    fn get_allowed_calls(&self, controller: Address) -> Result<Vec<CallRestriction>, DecodeError> {
        decode_allowed_calls(&self.get_data(allowed_calls_key(controller)))
    }

    fn get_allowed_keys(&self, controller: Address) -> Result<Vec<KeyPrefix>, DecodeError> {
        decode_allowed_keys(&self.get_data(allowed_data_keys_key(controller)))
    }

    /// Length stored under `AddressPermissions[]`; anything but 16 bytes counts as zero.
    fn controller_count(&self) -> u128 {
        let raw = self.get_data(CONTROLLERS_ARRAY_KEY);
        if raw.len() != 16 {
            return 0;
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&raw);
        u128::from_be_bytes(buf)
    }

    fn controller_at(&self, index: u128) -> Option<Address> {
        let raw = self.get_data(controller_index_key(index));
        (raw.len() == 20).then(|| Address::from_slice(&raw))
    }

    /// Well-formed entries of the controllers array, in index order. The length is read once
    /// and slots are only fetched as the iterator is advanced.
    fn controllers(&self) -> Controllers<'_, Self> {
        Controllers {
            store: self,
            next: 0,
            len: self.controller_count(),
        }
    }
}

/// Lazy walk over `AddressPermissions[]`, see [`PermissionStore::controllers`].
pub struct Controllers<'a, S: ?Sized> {
    store: &'a S,
    next: u128,
    len: u128,
}

impl<S: PermissionStore + ?Sized> Iterator for Controllers<'_, S> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        while self.next < self.len {
            let index = self.next;
            self.next += 1;
            if let Some(controller) = self.store.controller_at(index) {
                return Some(controller);
            }
        }
        None
    }
}

/// ERC-165 lookups on arbitrary call targets.
pub trait InterfaceDetector {
    fn supports_interface(&self, _account: Address, _interface_id: [u8; 4]) -> bool {
        false
    }
}

impl PermissionStore for BTreeMap<FixedBytes<32>, Vec<u8>> {
    fn get_data(&self, key: FixedBytes<32>) -> Vec<u8> {
        self.get(&key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_missing_entries_read_as_defaults() {
        let store: BTreeMap<FixedBytes<32>, Vec<u8>> = BTreeMap::new();
        let c = Address::repeat_byte(0x01);
        assert!(store.get_permissions(c).is_empty());
        assert!(store.get_allowed_calls(c).unwrap().is_empty());
        assert!(store.get_allowed_keys(c).unwrap().is_empty());
        assert_eq!(store.controller_count(), 0);
    }

    #[test]
    fn test_controllers_enumeration_skips_malformed_slots() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let mut store = BTreeMap::new();
        store.insert(CONTROLLERS_ARRAY_KEY, 3u128.to_be_bytes().to_vec());
        store.insert(controller_index_key(0), a.to_vec());
        store.insert(controller_index_key(1), vec![0x01, 0x02]);
        store.insert(controller_index_key(2), b.to_vec());

        assert_eq!(store.controller_count(), 3);
        assert_eq!(store.controller_at(1), None);
        assert_eq!(store.controllers().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_short_permission_value_fails_closed() {
        let c = Address::repeat_byte(0x02);
        let mut store = BTreeMap::new();
        store.insert(permissions_key(c), vec![0xff; 31]);
        assert_eq!(store.get_permissions(c), Permissions::NONE);
    }

    #[test]
    fn test_controllers_are_read_lazily() {
        let mut store = BTreeMap::new();
        let a = Address::repeat_byte(0xaa);
        store.insert(CONTROLLERS_ARRAY_KEY, u128::MAX.to_be_bytes().to_vec());
        store.insert(controller_index_key(0), a.to_vec());
        store.insert(controller_index_key(1), a.to_vec());

        assert_eq!(store.controller_count(), u128::MAX);
        assert_eq!(store.controllers().take(2).collect::<Vec<_>>(), vec![a, a]);
    }
}
