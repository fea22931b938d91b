use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

/// Errors while decoding compact bytes arrays stored under permission data keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A length prefix points past the end of the value.
    Truncated,
    /// An element has a length the element type does not accept.
    InvalidElementLength(usize),
}

/// Every reason the key manager can reject an invocation.
///
/// All of them abort the whole invocation. `TargetReverted` carries the revert data of the
/// target account untouched (ownership window errors, insufficient balance, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyManagerError {
    NoPermissionsSet {
        controller: Address,
    },
    NotAuthorised {
        controller: Address,
        permission: &'static str,
    },
    NotAllowedCall {
        controller: Address,
        target: Address,
        selector: [u8; 4],
    },
    NotAllowedERC725YDataKey {
        controller: Address,
        key: FixedBytes<32>,
    },
    InvalidWhitelistedCall {
        controller: Address,
    },
    InvalidRelayNonce {
        controller: Address,
        channel: u128,
        presented: u128,
    },
    InvalidERC725Function {
        selector: [u8; 4],
    },
    InvalidPayload,
    UnknownOperationType {
        operation: U256,
    },
    DelegateCallDisallowedViaKeyManager,
    CallingKeyManagerNotAllowed,
    InvalidEncodedAllowedCalls {
        value: Vec<u8>,
    },
    InvalidEncodedAllowedERC725YDataKeys {
        value: Vec<u8>,
    },
    InvalidDataValuesForDataKeys {
        key: FixedBytes<32>,
        value: Vec<u8>,
    },
    NotRecognisedPermissionKey {
        key: FixedBytes<32>,
    },
    ERC725YDataKeysValuesLengthMismatch,
    CannotSendValueToSetData,
    RelayCallBeforeStartTime,
    RelayCallExpired,
    BatchExecuteParamsLengthMismatch,
    BatchExecuteRelayCallParamsLengthMismatch,
    LSP6BatchInsufficientValueSent {
        total_values: U256,
        msg_value: U256,
    },
    LSP6BatchExcessiveValueSent {
        total_values: U256,
        msg_value: U256,
    },
    TargetReverted(Vec<u8>),
}
