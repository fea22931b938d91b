//! Solidity custom errors raised by the key manager.

use alloc::{string::String, vec::Vec};

use alloy_sol_types::sol;
use key_manager_core::{nonce::pack_nonce, KeyManagerError};
use stylus_sdk::{
    alloy_primitives::{Bytes, FixedBytes},
    stylus_proc::SolidityError,
};

sol! {
    error AlreadyInitialized(address target);
    error InvalidLSP6Target();

    error NoPermissionsSet(address from);
    error NotAuthorised(address from, string permission);
    error NotAllowedCall(address from, address to, bytes4 selector);
    error NotAllowedERC725YDataKey(address from, bytes32 disallowedKey);
    error InvalidWhitelistedCall(address from);
    /// `invalidNonce` is the packed `channel << 128 | counter` the relayer presented.
    error InvalidRelayNonce(address signer, uint256 invalidNonce);
    error InvalidERC725Function(bytes4 invalidFunction);
    error InvalidPayload();
    error ERC725X_UnknownOperationType(uint256 operationTypeProvided);
    error DelegateCallDisallowedViaKeyManager();
    error CallingKeyManagerNotAllowed();
    error InvalidEncodedAllowedCalls(bytes allowedCallsValue);
    error InvalidEncodedAllowedERC725YDataKeys(bytes value);
    error InvalidDataValuesForDataKeys(bytes32 dataKey, bytes dataValue);
    error NotRecognisedPermissionKey(bytes32 dataKey);
    error ERC725Y_DataKeysValuesLengthMismatch();
    error CannotSendValueToSetData();
    error RelayCallBeforeStartTime();
    error RelayCallExpired();
    error BatchExecuteParamsLengthMismatch();
    error BatchExecuteRelayCallParamsLengthMismatch();
    error LSP6BatchInsufficientValueSent(uint256 totalValues, uint256 msgValue);
    error LSP6BatchExcessiveValueSent(uint256 totalValues, uint256 msgValue);
}

#[derive(SolidityError)]
pub enum KeyManagerErrors {
    AlreadyInitialized(AlreadyInitialized),
    InvalidLSP6Target(InvalidLSP6Target),
    NoPermissionsSet(NoPermissionsSet),
    NotAuthorised(NotAuthorised),
    NotAllowedCall(NotAllowedCall),
    NotAllowedERC725YDataKey(NotAllowedERC725YDataKey),
    InvalidWhitelistedCall(InvalidWhitelistedCall),
    InvalidRelayNonce(InvalidRelayNonce),
    InvalidERC725Function(InvalidERC725Function),
    InvalidPayload(InvalidPayload),
    UnknownOperationType(ERC725X_UnknownOperationType),
    DelegateCallDisallowedViaKeyManager(DelegateCallDisallowedViaKeyManager),
    CallingKeyManagerNotAllowed(CallingKeyManagerNotAllowed),
    InvalidEncodedAllowedCalls(InvalidEncodedAllowedCalls),
    InvalidEncodedAllowedERC725YDataKeys(InvalidEncodedAllowedERC725YDataKeys),
    InvalidDataValuesForDataKeys(InvalidDataValuesForDataKeys),
    NotRecognisedPermissionKey(NotRecognisedPermissionKey),
    DataKeysValuesLengthMismatch(ERC725Y_DataKeysValuesLengthMismatch),
    CannotSendValueToSetData(CannotSendValueToSetData),
    RelayCallBeforeStartTime(RelayCallBeforeStartTime),
    RelayCallExpired(RelayCallExpired),
    BatchExecuteParamsLengthMismatch(BatchExecuteParamsLengthMismatch),
    BatchExecuteRelayCallParamsLengthMismatch(BatchExecuteRelayCallParamsLengthMismatch),
    LSP6BatchInsufficientValueSent(LSP6BatchInsufficientValueSent),
    LSP6BatchExcessiveValueSent(LSP6BatchExcessiveValueSent),
}

/// Revert data for a core error. Target reverts are bubbled byte for byte.
pub fn revert_data(err: KeyManagerError) -> Vec<u8> {
    use KeyManagerError as E;

    let mapped = match err {
        E::TargetReverted(data) => return data,
        E::NoPermissionsSet { controller } => {
            KeyManagerErrors::NoPermissionsSet(NoPermissionsSet { from: controller })
        }
        E::NotAuthorised {
            controller,
            permission,
        } => KeyManagerErrors::NotAuthorised(NotAuthorised {
            from: controller,
            permission: String::from(permission),
        }),
        E::NotAllowedCall {
            controller,
            target,
            selector,
        } => KeyManagerErrors::NotAllowedCall(NotAllowedCall {
            from: controller,
            to: target,
            selector: FixedBytes(selector),
        }),
        E::NotAllowedERC725YDataKey { controller, key } => {
            KeyManagerErrors::NotAllowedERC725YDataKey(NotAllowedERC725YDataKey {
                from: controller,
                disallowedKey: key,
            })
        }
        E::InvalidWhitelistedCall { controller } => {
            KeyManagerErrors::InvalidWhitelistedCall(InvalidWhitelistedCall { from: controller })
        }
        E::InvalidRelayNonce {
            controller,
            channel,
            presented,
        } => KeyManagerErrors::InvalidRelayNonce(InvalidRelayNonce {
            signer: controller,
            invalidNonce: pack_nonce(channel, presented),
        }),
        E::InvalidERC725Function { selector } => {
            KeyManagerErrors::InvalidERC725Function(InvalidERC725Function {
                invalidFunction: FixedBytes(selector),
            })
        }
        E::InvalidPayload => KeyManagerErrors::InvalidPayload(InvalidPayload {}),
        E::UnknownOperationType { operation } => {
            KeyManagerErrors::UnknownOperationType(ERC725X_UnknownOperationType {
                operationTypeProvided: operation,
            })
        }
        E::DelegateCallDisallowedViaKeyManager => {
            KeyManagerErrors::DelegateCallDisallowedViaKeyManager(
                DelegateCallDisallowedViaKeyManager {},
            )
        }
        E::CallingKeyManagerNotAllowed => {
            KeyManagerErrors::CallingKeyManagerNotAllowed(CallingKeyManagerNotAllowed {})
        }
        E::InvalidEncodedAllowedCalls { value } => {
            KeyManagerErrors::InvalidEncodedAllowedCalls(InvalidEncodedAllowedCalls {
                allowedCallsValue: Bytes::from(value),
            })
        }
        E::InvalidEncodedAllowedERC725YDataKeys { value } => {
            KeyManagerErrors::InvalidEncodedAllowedERC725YDataKeys(
                InvalidEncodedAllowedERC725YDataKeys {
                    value: Bytes::from(value),
                },
            )
        }
        E::InvalidDataValuesForDataKeys { key, value } => {
            KeyManagerErrors::InvalidDataValuesForDataKeys(InvalidDataValuesForDataKeys {
                dataKey: key,
                dataValue: Bytes::from(value),
            })
        }
        E::NotRecognisedPermissionKey { key } => {
            KeyManagerErrors::NotRecognisedPermissionKey(NotRecognisedPermissionKey { dataKey: key })
        }
        E::ERC725YDataKeysValuesLengthMismatch => KeyManagerErrors::DataKeysValuesLengthMismatch(
            ERC725Y_DataKeysValuesLengthMismatch {},
        ),
        E::CannotSendValueToSetData => {
            KeyManagerErrors::CannotSendValueToSetData(CannotSendValueToSetData {})
        }
        E::RelayCallBeforeStartTime => {
            KeyManagerErrors::RelayCallBeforeStartTime(RelayCallBeforeStartTime {})
        }
        E::RelayCallExpired => KeyManagerErrors::RelayCallExpired(RelayCallExpired {}),
        E::BatchExecuteParamsLengthMismatch => {
            KeyManagerErrors::BatchExecuteParamsLengthMismatch(BatchExecuteParamsLengthMismatch {})
        }
        E::BatchExecuteRelayCallParamsLengthMismatch => {
            KeyManagerErrors::BatchExecuteRelayCallParamsLengthMismatch(
                BatchExecuteRelayCallParamsLengthMismatch {},
            )
        }
        E::LSP6BatchInsufficientValueSent {
            total_values,
            msg_value,
        } => KeyManagerErrors::LSP6BatchInsufficientValueSent(LSP6BatchInsufficientValueSent {
            totalValues: total_values,
            msgValue: msg_value,
        }),
        E::LSP6BatchExcessiveValueSent {
            total_values,
            msg_value,
        } => KeyManagerErrors::LSP6BatchExcessiveValueSent(LSP6BatchExcessiveValueSent {
            totalValues: total_values,
            msgValue: msg_value,
        }),
    };
    mapped.into()
}
