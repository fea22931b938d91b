//! Permission checks.
//!
//! Pure functions of the controller's stored permissions and the decoded action. Reads go
//! through [`PermissionStore`]; nothing here writes state.

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    action::{Action, ExecuteOp, OperationType},
    allowed_calls::{leading_selector, required_call_types, CallTypes},
    allowed_keys::KeyPrefix,
    compact::is_compact_bytes_array,
    context::ExecutionContext,
    data_keys::{classify, DataKeyKind},
    errors::{DecodeError, KeyManagerError},
    permissions::{permission_name, Permissions},
    store::{InterfaceDetector, PermissionStore},
};

fn require(
    controller: Address,
    permissions: Permissions,
    flag: Permissions,
) -> Result<(), KeyManagerError> {
    if permissions.contains(flag) {
        return Ok(());
    }
    Err(KeyManagerError::NotAuthorised {
        controller,
        permission: permission_name(flag),
    })
}

/// Base flag or its SUPER variant; a miss reports the base flag.
fn require_either(
    controller: Address,
    permissions: Permissions,
    base: Permissions,
    super_flag: Permissions,
) -> Result<(), KeyManagerError> {
    if permissions.grants(base, super_flag) {
        return Ok(());
    }
    require(controller, permissions, base)
}

/// A nested call needs REENTRANCY on the identity re-entering.
pub fn check_reentrancy(
    controller: Address,
    permissions: Permissions,
    context: ExecutionContext,
) -> Result<(), KeyManagerError> {
    if context.is_reentrant() {
        require(controller, permissions, Permissions::REENTRANCY)?;
    }
    Ok(())
}

/// Route a decoded action to its check.
pub fn verify_action<S>(
    store: &S,
    key_manager: Address,
    controller: Address,
    permissions: Permissions,
    msg_value: U256,
    action: &Action,
) -> Result<(), KeyManagerError>
where
    S: PermissionStore + InterfaceDetector + ?Sized,
{
    match action {
        Action::SetData(entries) => {
            if !msg_value.is_zero() {
                return Err(KeyManagerError::CannotSendValueToSetData);
            }
            check_set_data(store, controller, permissions, entries)
        }
        Action::Execute(op) => check_execute(store, key_manager, controller, permissions, op),
        Action::ExecuteBatch(ops) => ops
            .iter()
            .try_for_each(|op| check_execute(store, key_manager, controller, permissions, op)),
        Action::TransferOwnership(_) | Action::AcceptOwnership | Action::RenounceOwnership => {
            check_ownership_action(controller, permissions)
        }
        Action::Unrecognized(selector) => Err(KeyManagerError::InvalidERC725Function {
            selector: *selector,
        }),
    }
}

/// LSP14 calls are forwarded untouched; the target runs its own two-step state machine.
pub fn check_ownership_action(
    controller: Address,
    permissions: Permissions,
) -> Result<(), KeyManagerError> {
    require(controller, permissions, Permissions::CHANGEOWNER)
}

/// ERC725X `execute` on behalf of `controller`.
pub fn check_execute<S>(
    store: &S,
    key_manager: Address,
    controller: Address,
    permissions: Permissions,
    op: &ExecuteOp,
) -> Result<(), KeyManagerError>
where
    S: PermissionStore + InterfaceDetector + ?Sized,
{
    let has_value = !op.value.is_zero();
    let has_data = !op.data.is_empty();

    let skip_allowed_calls = match op.operation {
        OperationType::DelegateCall => {
            return Err(KeyManagerError::DelegateCallDisallowedViaKeyManager)
        }
        OperationType::Create | OperationType::Create2 => {
            require(controller, permissions, Permissions::DEPLOY)?;
            // Funding a new contract cannot be narrowed by an allowed call, only SUPER applies.
            if has_value {
                require(controller, permissions, Permissions::SUPER_TRANSFERVALUE)?;
            }
            return Ok(());
        }
        OperationType::StaticCall => {
            require_either(
                controller,
                permissions,
                Permissions::STATICCALL,
                Permissions::SUPER_STATICCALL,
            )?;
            permissions.contains(Permissions::SUPER_STATICCALL)
        }
        OperationType::Call => {
            let super_transfer = permissions.contains(Permissions::SUPER_TRANSFERVALUE);
            let super_call = permissions.contains(Permissions::SUPER_CALL);

            if has_value && !super_transfer {
                require(controller, permissions, Permissions::TRANSFERVALUE)?;
            }
            if (has_data || !has_value) && !super_call {
                require(controller, permissions, Permissions::CALL)?;
            }

            (super_call && !has_value)
                || (super_transfer && has_value && !has_data)
                || (super_call && super_transfer)
        }
    };

    if op.target == key_manager {
        return Err(KeyManagerError::CallingKeyManagerNotAllowed);
    }
    if skip_allowed_calls {
        return Ok(());
    }

    let required = required_call_types(op.operation, op.value, &op.data);
    check_allowed_call(store, controller, op, required)
}

/// Existence check over the controller's allowed calls. Entry order does not matter.
pub fn check_allowed_call<S>(
    store: &S,
    controller: Address,
    op: &ExecuteOp,
    required: CallTypes,
) -> Result<(), KeyManagerError>
where
    S: PermissionStore + InterfaceDetector + ?Sized,
{
    let selector = leading_selector(&op.data);
    let not_allowed = KeyManagerError::NotAllowedCall {
        controller,
        target: op.target,
        selector,
    };

    let Ok(entries) = store.get_allowed_calls(controller) else {
        return Err(not_allowed);
    };
    if entries.is_empty() {
        return Ok(());
    }

    let mut skipped_unbounded = false;
    for entry in &entries {
        if entry.is_unbounded() {
            skipped_unbounded = true;
            continue;
        }
        let matches = entry.call_types.covers(required)
            && entry.matches_target(op.target)
            && entry.matches_selector(selector)
            && (entry.any_standard() || store.supports_interface(op.target, entry.standard));
        if matches {
            return Ok(());
        }
    }

    if skipped_unbounded {
        return Err(KeyManagerError::InvalidWhitelistedCall { controller });
    }
    Err(not_allowed)
}

/// `setData` / `setDataBatch`. The first rejected key aborts the whole batch.
pub fn check_set_data<S>(
    store: &S,
    controller: Address,
    permissions: Permissions,
    entries: &[(FixedBytes<32>, Vec<u8>)],
) -> Result<(), KeyManagerError>
where
    S: PermissionStore + ?Sized,
{
    let mut allowed_keys: Option<Result<Vec<KeyPrefix>, DecodeError>> = None;

    for (key, value) in entries {
        match classify(key) {
            DataKeyKind::Permissions(subject) => {
                if !value.is_empty() && value.len() != 32 {
                    return Err(invalid_value(key, value));
                }
                let flag = add_or_change(store.get_permissions(subject).is_empty());
                require(controller, permissions, flag)?;
            }
            DataKeyKind::AllowedCalls(_) => {
                if !is_compact_bytes_array(value, |len| len == 32) {
                    return Err(KeyManagerError::InvalidEncodedAllowedCalls {
                        value: value.clone(),
                    });
                }
                let flag = add_or_change(store.get_data(*key).is_empty());
                require(controller, permissions, flag)?;
            }
            DataKeyKind::AllowedDataKeys(_) => {
                if !is_compact_bytes_array(value, |len| (1..=32).contains(&len)) {
                    return Err(KeyManagerError::InvalidEncodedAllowedERC725YDataKeys {
                        value: value.clone(),
                    });
                }
                let flag = add_or_change(store.get_data(*key).is_empty());
                require(controller, permissions, flag)?;
            }
            DataKeyKind::ControllersLength => {
                if value.len() != 16 {
                    return Err(invalid_value(key, value));
                }
                let mut buf = [0u8; 16];
                buf.copy_from_slice(value);
                let grows = u128::from_be_bytes(buf) > store.controller_count();
                require(controller, permissions, add_or_change(grows))?;
            }
            DataKeyKind::ControllerAt(_) => {
                if !value.is_empty() && value.len() != 20 {
                    return Err(invalid_value(key, value));
                }
                let flag = add_or_change(store.get_data(*key).is_empty());
                require(controller, permissions, flag)?;
            }
            DataKeyKind::UnrecognisedPermission => {
                return Err(KeyManagerError::NotRecognisedPermissionKey { key: *key });
            }
            DataKeyKind::UniversalReceiverDelegate => {
                let flag = if store.get_data(*key).is_empty() {
                    Permissions::ADDUNIVERSALRECEIVERDELEGATE
                } else {
                    Permissions::CHANGEUNIVERSALRECEIVERDELEGATE
                };
                require(controller, permissions, flag)?;
            }
            DataKeyKind::Extension => {
                let flag = if store.get_data(*key).is_empty() {
                    Permissions::ADDEXTENSIONS
                } else {
                    Permissions::CHANGEEXTENSIONS
                };
                require(controller, permissions, flag)?;
            }
            DataKeyKind::Regular => {
                require_either(
                    controller,
                    permissions,
                    Permissions::SETDATA,
                    Permissions::SUPER_SETDATA,
                )?;
                if permissions.contains(Permissions::SUPER_SETDATA) {
                    continue;
                }
                let prefixes =
                    allowed_keys.get_or_insert_with(|| store.get_allowed_keys(controller));
                let allowed = match prefixes {
                    Ok(list) => list.is_empty() || list.iter().any(|p| p.matches(key)),
                    Err(_) => false,
                };
                if !allowed {
                    return Err(KeyManagerError::NotAllowedERC725YDataKey {
                        controller,
                        key: *key,
                    });
                }
            }
        }
    }
    Ok(())
}

fn add_or_change(is_new: bool) -> Permissions {
    if is_new {
        Permissions::ADDPERMISSIONS
    } else {
        Permissions::CHANGEPERMISSIONS
    }
}

fn invalid_value(key: &FixedBytes<32>, value: &[u8]) -> KeyManagerError {
    KeyManagerError::InvalidDataValuesForDataKeys {
        key: *key,
        value: value.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;
    use crate::{
        allowed_calls::{ANY_ADDRESS, ANY_SELECTOR, ANY_STANDARD},
        data_keys::{
            allowed_calls_key, allowed_data_keys_key, controller_index_key, extension_key,
            permissions_key, CONTROLLERS_ARRAY_KEY, LSP1_UNIVERSAL_RECEIVER_DELEGATE_KEY,
        },
        testing::{TestHost, KEY_MANAGER},
    };

    const CONTROLLER: Address = Address::new([0xc0; 20]);
    const RECIPIENT: Address = Address::new([0x22; 20]);
    const SET_DATA: [u8; 4] = [0x7f, 0x23, 0x69, 0x0c];

    fn allowed_calls(entries: &[(u32, Address, [u8; 4], [u8; 4])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (call_types, target, standard, selector) in entries {
            out.extend_from_slice(&32u16.to_be_bytes());
            out.extend_from_slice(&call_types.to_be_bytes());
            out.extend_from_slice(target.as_slice());
            out.extend_from_slice(standard);
            out.extend_from_slice(selector);
        }
        out
    }

    fn call(target: Address, value: u64, data: &[u8]) -> ExecuteOp {
        ExecuteOp {
            operation: OperationType::Call,
            target,
            value: U256::from(value),
            data: data.to_vec(),
        }
    }

    fn execute(host: &TestHost, permissions: Permissions, op: &ExecuteOp) -> Result<(), KeyManagerError> {
        check_execute(host, KEY_MANAGER, CONTROLLER, permissions, op)
    }

    fn not_authorised(permission: &'static str) -> KeyManagerError {
        KeyManagerError::NotAuthorised {
            controller: CONTROLLER,
            permission,
        }
    }

    #[test]
    fn test_setdata_and_call_without_transfervalue() {
        let host = TestHost::default();
        let permissions = Permissions::SETDATA | Permissions::CALL;

        assert_eq!(execute(&host, permissions, &call(RECIPIENT, 0, &[0xab; 4])), Ok(()));
        assert_eq!(
            execute(&host, permissions, &call(RECIPIENT, 1, &[0xab; 4])),
            Err(not_authorised("TRANSFERVALUE"))
        );
    }

    #[test]
    fn test_value_only_allowed_call_rejects_payload() {
        let mut host = TestHost::default();
        host.set(
            allowed_calls_key(CONTROLLER),
            allowed_calls(&[(0x1, RECIPIENT, ANY_STANDARD, ANY_SELECTOR)]),
        );
        let permissions = Permissions::TRANSFERVALUE | Permissions::CALL;

        assert_eq!(execute(&host, permissions, &call(RECIPIENT, 5, &[])), Ok(()));

        let mut data = SET_DATA.to_vec();
        data.extend_from_slice(&[0u8; 64]);
        assert_eq!(
            execute(&host, permissions, &call(RECIPIENT, 5, &data)),
            Err(KeyManagerError::NotAllowedCall {
                controller: CONTROLLER,
                target: RECIPIENT,
                selector: SET_DATA,
            })
        );
    }

    #[test]
    fn test_allowed_call_is_an_existence_check() {
        let other = Address::repeat_byte(0x33);
        let mut host = TestHost::default();
        host.set(
            allowed_calls_key(CONTROLLER),
            allowed_calls(&[
                (0x2, other, ANY_STANDARD, ANY_SELECTOR),
                (0x2, RECIPIENT, ANY_STANDARD, [0xaa, 0xbb, 0xcc, 0xdd]),
            ]),
        );

        let op = call(RECIPIENT, 0, &[0xaa, 0xbb, 0xcc, 0xdd, 0x01]);
        assert_eq!(execute(&host, Permissions::CALL, &op), Ok(()));
        let wrong_selector = call(RECIPIENT, 0, &[0xaa, 0xbb, 0xcc, 0xde]);
        assert!(matches!(
            execute(&host, Permissions::CALL, &wrong_selector),
            Err(KeyManagerError::NotAllowedCall { .. })
        ));
    }

    #[test]
    fn test_allowed_standard_uses_interface_detection() {
        let standard = [0x12, 0x34, 0x56, 0x78];
        let mut host = TestHost::default();
        host.set(
            allowed_calls_key(CONTROLLER),
            allowed_calls(&[(0x2, ANY_ADDRESS, standard, ANY_SELECTOR)]),
        );
        let op = call(RECIPIENT, 0, &[0x01, 0x02, 0x03, 0x04]);

        assert!(execute(&host, Permissions::CALL, &op).is_err());
        host.interfaces.insert((RECIPIENT, standard));
        assert_eq!(execute(&host, Permissions::CALL, &op), Ok(()));
    }

    #[test]
    fn test_fully_wildcarded_entry_never_qualifies() {
        let mut host = TestHost::default();
        host.set(
            allowed_calls_key(CONTROLLER),
            allowed_calls(&[(0xf, ANY_ADDRESS, ANY_STANDARD, ANY_SELECTOR)]),
        );
        assert_eq!(
            execute(&host, Permissions::CALL, &call(RECIPIENT, 0, &[])),
            Err(KeyManagerError::InvalidWhitelistedCall {
                controller: CONTROLLER
            })
        );
    }

    #[test]
    fn test_malformed_allowed_calls_deny() {
        let mut host = TestHost::default();
        host.set(allowed_calls_key(CONTROLLER), vec![0x00, 0x20, 0x01]);
        assert!(matches!(
            execute(&host, Permissions::CALL, &call(RECIPIENT, 0, &[])),
            Err(KeyManagerError::NotAllowedCall { .. })
        ));
    }

    #[test]
    fn test_super_call_skips_allowed_calls_only_without_value() {
        let mut host = TestHost::default();
        host.set(
            allowed_calls_key(CONTROLLER),
            allowed_calls(&[(0x2, Address::repeat_byte(0x99), ANY_STANDARD, ANY_SELECTOR)]),
        );
        let permissions = Permissions::SUPER_CALL | Permissions::TRANSFERVALUE;

        assert_eq!(execute(&host, permissions, &call(RECIPIENT, 0, &[0x01; 4])), Ok(()));
        assert!(execute(&host, permissions, &call(RECIPIENT, 1, &[0x01; 4])).is_err());
        assert_eq!(
            execute(
                &host,
                permissions | Permissions::SUPER_TRANSFERVALUE,
                &call(RECIPIENT, 1, &[0x01; 4])
            ),
            Ok(())
        );
    }

    #[test]
    fn test_operation_kinds() {
        let host = TestHost::default();
        let mut op = call(RECIPIENT, 0, &[]);

        op.operation = OperationType::DelegateCall;
        assert_eq!(
            execute(&host, Permissions::ALL, &op),
            Err(KeyManagerError::DelegateCallDisallowedViaKeyManager)
        );

        op.operation = OperationType::StaticCall;
        assert_eq!(execute(&host, Permissions::CALL, &op), Err(not_authorised("STATICCALL")));
        assert_eq!(execute(&host, Permissions::SUPER_STATICCALL, &op), Ok(()));

        op.operation = OperationType::Create2;
        assert_eq!(execute(&host, Permissions::CALL, &op), Err(not_authorised("DEPLOY")));
        assert_eq!(execute(&host, Permissions::DEPLOY, &op), Ok(()));
        op.value = U256::from(1u64);
        assert_eq!(
            execute(&host, Permissions::DEPLOY | Permissions::TRANSFERVALUE, &op),
            Err(not_authorised("SUPER_TRANSFERVALUE"))
        );
    }

    #[test]
    fn test_target_cannot_call_back_into_key_manager() {
        let host = TestHost::default();
        assert_eq!(
            execute(&host, Permissions::SUPER_CALL, &call(KEY_MANAGER, 0, &[0x01; 4])),
            Err(KeyManagerError::CallingKeyManagerNotAllowed)
        );
    }

    #[test]
    fn test_set_data_respects_allowed_keys() {
        let allowed = FixedBytes::<32>::repeat_byte(0xab);
        let denied = FixedBytes::<32>::repeat_byte(0xcd);
        let mut host = TestHost::default();
        host.set(allowed_data_keys_key(CONTROLLER), vec![0x00, 0x02, 0xab, 0xab]);

        let ok = [(allowed, vec![1u8])];
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::SETDATA, &ok), Ok(()));

        let batch = [(allowed, vec![1u8]), (denied, vec![2u8])];
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::SETDATA, &batch),
            Err(KeyManagerError::NotAllowedERC725YDataKey {
                controller: CONTROLLER,
                key: denied
            })
        );
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::SUPER_SETDATA, &batch), Ok(()));
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::CALL, &ok),
            Err(not_authorised("SETDATA"))
        );
    }

    #[test]
    fn test_permission_keys_need_add_or_change() {
        let subject = Address::repeat_byte(0x5e);
        let mut host = TestHost::default();
        let grant = [(permissions_key(subject), Permissions::CALL.to_be_bytes().to_vec())];

        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::CHANGEPERMISSIONS, &grant),
            Err(not_authorised("ADDPERMISSIONS"))
        );
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::ADDPERMISSIONS, &grant), Ok(()));

        host.set(permissions_key(subject), Permissions::SETDATA.to_be_bytes().to_vec());
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::ADDPERMISSIONS, &grant),
            Err(not_authorised("CHANGEPERMISSIONS"))
        );

        let bad_calls = [(allowed_calls_key(subject), vec![0x00, 0x04, 1, 2, 3, 4])];
        assert!(matches!(
            check_set_data(&host, CONTROLLER, Permissions::ALL, &bad_calls),
            Err(KeyManagerError::InvalidEncodedAllowedCalls { .. })
        ));
        let bad_keys = [(allowed_data_keys_key(subject), vec![0x00, 0x00])];
        assert!(matches!(
            check_set_data(&host, CONTROLLER, Permissions::ALL, &bad_keys),
            Err(KeyManagerError::InvalidEncodedAllowedERC725YDataKeys { .. })
        ));
        let short = [(permissions_key(subject), vec![0x01])];
        assert!(matches!(
            check_set_data(&host, CONTROLLER, Permissions::ALL, &short),
            Err(KeyManagerError::InvalidDataValuesForDataKeys { .. })
        ));
    }

    #[test]
    fn test_controllers_array_keys() {
        let mut host = TestHost::default();
        host.set(CONTROLLERS_ARRAY_KEY, 1u128.to_be_bytes().to_vec());

        let grow = [(CONTROLLERS_ARRAY_KEY, 2u128.to_be_bytes().to_vec())];
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::CHANGEPERMISSIONS, &grow),
            Err(not_authorised("ADDPERMISSIONS"))
        );
        let shrink = [(CONTROLLERS_ARRAY_KEY, 0u128.to_be_bytes().to_vec())];
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::CHANGEPERMISSIONS, &shrink), Ok(()));

        let slot = [(controller_index_key(1), CONTROLLER.to_vec())];
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::ADDPERMISSIONS, &slot), Ok(()));
        let bad_slot = [(controller_index_key(1), vec![0u8; 19])];
        assert!(check_set_data(&host, CONTROLLER, Permissions::ALL, &bad_slot).is_err());
    }

    #[test]
    fn test_unrecognised_permission_namespace_key() {
        let host = TestHost::default();
        let mut raw = [0u8; 32];
        raw[..6].copy_from_slice(&crate::data_keys::ADDRESS_PERMISSIONS_PREFIX);
        raw[6] = 0xee;
        let key = FixedBytes(raw);
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::ALL, &[(key, vec![])]),
            Err(KeyManagerError::NotRecognisedPermissionKey { key })
        );
    }

    #[test]
    fn test_receiver_delegate_and_extension_keys() {
        let mut host = TestHost::default();
        let urd = [(LSP1_UNIVERSAL_RECEIVER_DELEGATE_KEY, vec![0x01; 20])];
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::SUPER_SETDATA, &urd),
            Err(not_authorised("ADDUNIVERSALRECEIVERDELEGATE"))
        );
        host.set(LSP1_UNIVERSAL_RECEIVER_DELEGATE_KEY, vec![0x02; 20]);
        assert_eq!(
            check_set_data(&host, CONTROLLER, Permissions::CHANGEUNIVERSALRECEIVERDELEGATE, &urd),
            Ok(())
        );

        let ext = [(extension_key([0xca, 0xfe, 0xca, 0xfe]), vec![0x01; 20])];
        assert_eq!(check_set_data(&host, CONTROLLER, Permissions::ADDEXTENSIONS, &ext), Ok(()));
    }

    #[test]
    fn test_verify_action_routes() {
        let host = TestHost::default();
        let verify = |permissions, value: u64, action: &Action| {
            verify_action(&host, KEY_MANAGER, CONTROLLER, permissions, U256::from(value), action)
        };

        assert_eq!(
            verify(Permissions::SETDATA, 1, &Action::SetData(vec![])),
            Err(KeyManagerError::CannotSendValueToSetData)
        );
        assert_eq!(
            verify(Permissions::CALL, 0, &Action::RenounceOwnership),
            Err(not_authorised("CHANGEOWNER"))
        );
        assert_eq!(verify(Permissions::CHANGEOWNER, 0, &Action::AcceptOwnership), Ok(()));
        assert_eq!(
            verify(Permissions::ALL, 0, &Action::Unrecognized([1, 2, 3, 4])),
            Err(KeyManagerError::InvalidERC725Function {
                selector: [1, 2, 3, 4]
            })
        );

        let batch = Action::ExecuteBatch(vec![
            call(RECIPIENT, 0, &[]),
            ExecuteOp {
                operation: OperationType::Create,
                ..call(Address::ZERO, 0, &[0x60])
            },
        ]);
        assert_eq!(verify(Permissions::CALL, 0, &batch), Err(not_authorised("DEPLOY")));
        assert_eq!(verify(Permissions::CALL | Permissions::DEPLOY, 0, &batch), Ok(()));
    }

    #[test]
    fn test_reentrancy_requires_flag() {
        let nested = ExecutionContext {
            controller: RECIPIENT,
            depth: 1,
        };
        assert_eq!(check_reentrancy(CONTROLLER, Permissions::CALL, ExecutionContext::default()), Ok(()));
        assert_eq!(
            check_reentrancy(CONTROLLER, Permissions::CALL, nested),
            Err(not_authorised("REENTRANCY"))
        );
        assert_eq!(
            check_reentrancy(CONTROLLER, Permissions::CALL | Permissions::REENTRANCY, nested),
            Ok(())
        );
    }
}
