//! ERC725Y data keys the key manager reads and guards.
//!
//! Mapping keys are `bytes10 prefix || bytes2(0) || bytes20 suffix`; the array key follows LSP2
//! (`keccak256("AddressPermissions[]")` for the length, its first 16 bytes + `uint128` index
//! for elements).

use alloy_primitives::{b256, Address, FixedBytes};

/// `bytes6(keccak256("AddressPermissions"))`, shared by every permission key.
pub const ADDRESS_PERMISSIONS_PREFIX: [u8; 6] = [0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf];

/// `AddressPermissions:Permissions:<address>`
pub const PERMISSIONS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x82, 0xac, 0xb3, 0x63, 0x00, 0x00,
];

/// `AddressPermissions:AllowedCalls:<address>`
pub const ALLOWED_CALLS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x39, 0x3a, 0x64, 0xc7, 0x00, 0x00,
];

/// `AddressPermissions:AllowedERC725YDataKeys:<address>`
pub const ALLOWED_DATA_KEYS_PREFIX: [u8; 12] = [
    0x4b, 0x80, 0x74, 0x2d, 0xe2, 0xbf, 0x86, 0x6c, 0x29, 0x11, 0x00, 0x00,
];

/// `AddressPermissions[]` (array length).
pub const CONTROLLERS_ARRAY_KEY: FixedBytes<32> =
    b256!("df30dba06db6a30e65354d9a64c609861f089545ca58c6b4dbe31a5f338cb0e3");

/// `LSP1UniversalReceiverDelegate`
pub const LSP1_UNIVERSAL_RECEIVER_DELEGATE_KEY: FixedBytes<32> =
    b256!("0cfc51aec37c55a4d0b1a65c6255c4bf2fbdf6277f3cc0730c45b828b6db8b47");

/// `LSP1UniversalReceiverDelegate:<bytes32>`
pub const LSP1_UNIVERSAL_RECEIVER_DELEGATE_PREFIX: [u8; 12] = [
    0x0c, 0xfc, 0x51, 0xae, 0xc3, 0x7c, 0x55, 0xa4, 0xd0, 0xb1, 0x00, 0x00,
];

/// `LSP17Extension:<bytes4>`
pub const LSP17_EXTENSION_PREFIX: [u8; 12] = [
    0xce, 0xe7, 0x8b, 0x40, 0x94, 0xda, 0x86, 0x01, 0x10, 0x96, 0x00, 0x00,
];

/// What a data key means to the key manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKeyKind {
    Permissions(Address),
    AllowedCalls(Address),
    AllowedDataKeys(Address),
    ControllersLength,
    ControllerAt(u128),
    /// Inside the `AddressPermissions` namespace but not a key the key manager knows.
    UnrecognisedPermission,
    UniversalReceiverDelegate,
    Extension,
    Regular,
}

pub fn classify(key: &FixedBytes<32>) -> DataKeyKind {
    if *key == CONTROLLERS_ARRAY_KEY {
        return DataKeyKind::ControllersLength;
    }
    if key[..16] == CONTROLLERS_ARRAY_KEY[..16] {
        let mut index = [0u8; 16];
        index.copy_from_slice(&key[16..]);
        return DataKeyKind::ControllerAt(u128::from_be_bytes(index));
    }
    if key[..6] == ADDRESS_PERMISSIONS_PREFIX {
        let controller = Address::from_slice(&key[12..]);
        return match &key[..12] {
            p if p == PERMISSIONS_PREFIX => DataKeyKind::Permissions(controller),
            p if p == ALLOWED_CALLS_PREFIX => DataKeyKind::AllowedCalls(controller),
            p if p == ALLOWED_DATA_KEYS_PREFIX => DataKeyKind::AllowedDataKeys(controller),
            _ => DataKeyKind::UnrecognisedPermission,
        };
    }
    if *key == LSP1_UNIVERSAL_RECEIVER_DELEGATE_KEY
        || key[..12] == LSP1_UNIVERSAL_RECEIVER_DELEGATE_PREFIX
    {
        return DataKeyKind::UniversalReceiverDelegate;
    }
    if key[..12] == LSP17_EXTENSION_PREFIX {
        return DataKeyKind::Extension;
    }
    DataKeyKind::Regular
}

fn mapping_key(prefix: &[u8; 12], suffix: &[u8]) -> FixedBytes<32> {
    let mut key = [0u8; 32];
    key[..12].copy_from_slice(prefix);
    key[12..12 + suffix.len()].copy_from_slice(suffix);
    FixedBytes(key)
}

pub fn permissions_key(controller: Address) -> FixedBytes<32> {
    mapping_key(&PERMISSIONS_PREFIX, controller.as_slice())
}

pub fn allowed_calls_key(controller: Address) -> FixedBytes<32> {
    mapping_key(&ALLOWED_CALLS_PREFIX, controller.as_slice())
}

pub fn allowed_data_keys_key(controller: Address) -> FixedBytes<32> {
    mapping_key(&ALLOWED_DATA_KEYS_PREFIX, controller.as_slice())
}

pub fn controller_index_key(index: u128) -> FixedBytes<32> {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&CONTROLLERS_ARRAY_KEY[..16]);
    key[16..].copy_from_slice(&index.to_be_bytes());
    FixedBytes(key)
}

pub fn extension_key(selector: [u8; 4]) -> FixedBytes<32> {
    mapping_key(&LSP17_EXTENSION_PREFIX, &selector)
}
