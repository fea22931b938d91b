//! `AddressPermissions:AllowedCalls:<address>` entries.
//!
//! Each entry is 32 bytes inside a compact bytes array:
//! - `bytes4 callTypes` (VALUE / CALL / STATICCALL / DELEGATECALL bits)
//! - `address target`
//! - `bytes4 interfaceId` (ERC-165 standard the target must declare)
//! - `bytes4 selector`
//!
//! All-ones in the target, standard or selector field matches anything.

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use crate::{action::OperationType, compact::decode_compact_bytes_array, errors::DecodeError};

pub const ANY_ADDRESS: Address = Address(FixedBytes([0xff; 20]));
pub const ANY_STANDARD: [u8; 4] = [0xff; 4];
pub const ANY_SELECTOR: [u8; 4] = [0xff; 4];

/// Call-type bits of an allowed call entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallTypes(pub u32);

impl CallTypes {
    pub const NONE: Self = Self(0);
    pub const VALUE: Self = Self(0x1);
    pub const CALL: Self = Self(0x2);
    pub const STATICCALL: Self = Self(0x4);
    pub const DELEGATECALL: Self = Self(0x8);

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn covers(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }
}

/// One allowed `(callTypes, target, standard, selector)` tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallRestriction {
    pub call_types: CallTypes,
    pub target: Address,
    pub standard: [u8; 4],
    pub selector: [u8; 4],
}

impl CallRestriction {
    pub const ENCODED_LEN: usize = 32;

    /// Parse a single 32-byte entry.
    pub fn from_slice(entry: &[u8]) -> Result<Self, DecodeError> {
        if entry.len() != Self::ENCODED_LEN {
            return Err(DecodeError::InvalidElementLength(entry.len()));
        }
        let mut call_types = [0u8; 4];
        call_types.copy_from_slice(&entry[0..4]);
        let mut standard = [0u8; 4];
        standard.copy_from_slice(&entry[24..28]);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&entry[28..32]);

        Ok(Self {
            call_types: CallTypes(u32::from_be_bytes(call_types)),
            target: Address::from_slice(&entry[4..24]),
            standard,
            selector,
        })
    }

    /// Target, standard and selector all wildcards. Such an entry is not a restriction and
    /// never qualifies a call.
    pub fn is_unbounded(&self) -> bool {
        self.target == ANY_ADDRESS && self.standard == ANY_STANDARD && self.selector == ANY_SELECTOR
    }

    pub fn matches_target(&self, target: Address) -> bool {
        self.target == ANY_ADDRESS || self.target == target
    }

    pub fn matches_selector(&self, selector: [u8; 4]) -> bool {
        self.selector == ANY_SELECTOR || self.selector == selector
    }

    /// Standard must be checked by the caller against ERC-165 unless this returns true.
    pub fn any_standard(&self) -> bool {
        self.standard == ANY_STANDARD
    }
}

/// Decode a stored allowed-calls value. An empty value is an empty list.
pub fn decode_allowed_calls(value: &[u8]) -> Result<Vec<CallRestriction>, DecodeError> {
    decode_compact_bytes_array(value, |len| len == CallRestriction::ENCODED_LEN)?
        .into_iter()
        .map(CallRestriction::from_slice)
        .collect()
}

/// Call types an entry must cover for this operation.
///
/// A plain CALL needs VALUE when it moves value and CALL when it carries data (or moves
/// nothing at all); a bare value transfer only needs VALUE.
pub fn required_call_types(operation: OperationType, value: U256, data: &[u8]) -> CallTypes {
    match operation {
        OperationType::Call => {
            let mut required = CallTypes::NONE;
            if !value.is_zero() {
                required = required.with(CallTypes::VALUE);
            }
            if value.is_zero() || !data.is_empty() {
                required = required.with(CallTypes::CALL);
            }
            required
        }
        OperationType::StaticCall => CallTypes::STATICCALL,
        OperationType::DelegateCall => CallTypes::DELEGATECALL,
        OperationType::Create | OperationType::Create2 => CallTypes::NONE,
    }
}

/// `bytes4(data)`: the first four bytes, zero padded on the right when shorter.
pub fn leading_selector(data: &[u8]) -> [u8; 4] {
    let mut selector = [0u8; 4];
    let n = data.len().min(4);
    selector[..n].copy_from_slice(&data[..n]);
    selector
}
