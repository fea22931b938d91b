//! Entry points of the key manager.
//!
//! Every public function here is one top-level invocation: it runs under a host checkpoint and
//! either completes entirely or leaves no trace (nonces, target storage, events).

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    action::{decode_action, payload_selector, Action},
    constants::{
        ERC1271_FAIL_VALUE, ERC1271_MAGIC_VALUE, LSP20_VERIFY_CALL_RESULT_MAGIC_VALUE,
        LSP20_VERIFY_CALL_WITHOUT_POST_VERIFICATION, LSP20_VERIFY_CALL_WITH_POST_VERIFICATION,
        SIGNATURE_LENGTH,
    },
    context::{ExecutionContext, ExecutionGuard},
    errors::KeyManagerError,
    evaluator::{check_reentrancy, verify_action},
    host::Host,
    permissions::Permissions,
    relay::{RelayEnvelope, ValidityWindow},
};

/// Direct call from `caller`, forwarding `msg_value` with the payload.
pub fn execute<H: Host>(
    host: &mut H,
    caller: Address,
    msg_value: U256,
    payload: &[u8],
) -> Result<Vec<u8>, KeyManagerError> {
    atomically(host, |host| handle(host, caller, msg_value, payload))
}

/// Several direct calls; `values[i]` goes with `payloads[i]` and they must add up to
/// `msg_value` exactly.
pub fn execute_batch<H: Host>(
    host: &mut H,
    caller: Address,
    msg_value: U256,
    values: &[U256],
    payloads: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, KeyManagerError> {
    if values.len() != payloads.len() {
        return Err(KeyManagerError::BatchExecuteParamsLengthMismatch);
    }
    check_batch_value(values, msg_value)?;

    atomically(host, |host| {
        values
            .iter()
            .zip(payloads)
            .map(|(value, payload)| handle(host, caller, *value, payload))
            .collect()
    })
}

/// Payload signed by a controller and submitted by anyone.
///
/// The signer is recovered over a message that includes `msg_value`, so a relayer attaching a
/// different value than signed recovers some other address and fails the permission checks.
pub fn execute_relay_call<H: Host>(
    host: &mut H,
    msg_value: U256,
    signature: &[u8],
    nonce: U256,
    validity: U256,
    payload: &[u8],
) -> Result<Vec<u8>, KeyManagerError> {
    atomically(host, |host| {
        relay(host, signature, nonce, validity, msg_value, payload)
    })
}

/// Batched relay calls, each authenticated with its own signed value.
pub fn execute_relay_call_batch<H: Host>(
    host: &mut H,
    msg_value: U256,
    signatures: &[Vec<u8>],
    nonces: &[U256],
    validities: &[U256],
    values: &[U256],
    payloads: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, KeyManagerError> {
    let n = signatures.len();
    if nonces.len() != n || validities.len() != n || values.len() != n || payloads.len() != n {
        return Err(KeyManagerError::BatchExecuteRelayCallParamsLengthMismatch);
    }
    check_batch_value(values, msg_value)?;

    atomically(host, |host| {
        (0..n)
            .map(|i| relay(host, &signatures[i], nonces[i], validities[i], values[i], &payloads[i]))
            .collect()
    })
}

/// ERC-1271: magic value iff the signer of `hash` holds SIGN. Failures are data, never errors.
pub fn is_valid_signature<H: Host>(host: &H, hash: FixedBytes<32>, signature: &[u8]) -> [u8; 4] {
    if signature.len() != SIGNATURE_LENGTH {
        return ERC1271_FAIL_VALUE;
    }
    let signer = host.recover_signer(hash, signature);
    if host.get_permissions(signer).contains(Permissions::SIGN) {
        ERC1271_MAGIC_VALUE
    } else {
        ERC1271_FAIL_VALUE
    }
}

/// LSP20 pre-call hook: the account asks whether `caller` may run `payload` on it directly.
///
/// When the bound account asks, the call is recorded as in flight until
/// [`lsp20_verify_call_result`] and `PermissionsVerified` is emitted. Anyone else gets a
/// read-only answer. A setData payload or a re-entrant call returns the magic value that skips
/// the post-call hook.
pub fn lsp20_verify_call<H: Host>(
    host: &mut H,
    msg_sender: Address,
    caller: Address,
    msg_value: U256,
    payload: &[u8],
) -> Result<[u8; 4], KeyManagerError> {
    let selector = payload_selector(payload)?;
    let action = decode_action(payload)?;
    let is_set_data = matches!(action, Action::SetData(_));

    let permissions = host.get_permissions(caller);
    if permissions.is_empty() {
        return Err(KeyManagerError::NoPermissionsSet { controller: caller });
    }
    let context = host.execution_context();
    let reentrant = context.is_reentrant();
    check_reentrancy(caller, permissions, context)?;

    let key_manager = host.key_manager();
    verify_action(&*host, key_manager, caller, permissions, msg_value, &action)?;

    if msg_sender == host.target() {
        if !reentrant && !is_set_data {
            host.set_execution_context(ExecutionContext {
                controller: caller,
                depth: context.depth.saturating_add(1),
            });
        }
        host.permissions_verified(caller, msg_value, selector);
    }

    if is_set_data || reentrant {
        Ok(LSP20_VERIFY_CALL_WITHOUT_POST_VERIFICATION)
    } else {
        Ok(LSP20_VERIFY_CALL_WITH_POST_VERIFICATION)
    }
}

/// LSP20 post-call hook: clears the in-flight call opened by [`lsp20_verify_call`].
pub fn lsp20_verify_call_result<H: Host>(host: &mut H, msg_sender: Address) -> [u8; 4] {
    if msg_sender == host.target() {
        host.set_execution_context(ExecutionContext::default());
    }
    LSP20_VERIFY_CALL_RESULT_MAGIC_VALUE
}

fn check_batch_value(values: &[U256], msg_value: U256) -> Result<(), KeyManagerError> {
    let total_values = values
        .iter()
        .try_fold(U256::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or(KeyManagerError::LSP6BatchInsufficientValueSent {
            total_values: U256::MAX,
            msg_value,
        })?;
    if total_values > msg_value {
        return Err(KeyManagerError::LSP6BatchInsufficientValueSent {
            total_values,
            msg_value,
        });
    }
    if total_values < msg_value {
        return Err(KeyManagerError::LSP6BatchExcessiveValueSent {
            total_values,
            msg_value,
        });
    }
    Ok(())
}

fn atomically<H, T, F>(host: &mut H, f: F) -> Result<T, KeyManagerError>
where
    H: Host,
    F: FnOnce(&mut H) -> Result<T, KeyManagerError>,
{
    let checkpoint = host.checkpoint();
    let result = f(host);
    if result.is_err() {
        host.revert(checkpoint);
    }
    result
}

/// Recover, consume the nonce, check the window, then dispatch as the signer.
fn relay<H: Host>(
    host: &mut H,
    signature: &[u8],
    nonce: U256,
    validity: U256,
    value: U256,
    payload: &[u8],
) -> Result<Vec<u8>, KeyManagerError> {
    let envelope = RelayEnvelope {
        chain_id: host.chain_id(),
        nonce,
        validity,
        value,
        payload: payload.to_vec(),
    };
    let signer = host.recover_signer(envelope.digest(host.key_manager()), signature);

    // Consumed before forwarding so a nested replay of the same signature is rejected.
    host.consume_packed(signer, nonce)?;
    ValidityWindow::from_packed(validity).check(host.block_timestamp())?;

    handle(host, signer, value, payload)
}

/// Shared route for direct and relayed calls once the controller is known.
fn handle<H: Host>(
    host: &mut H,
    controller: Address,
    value: U256,
    payload: &[u8],
) -> Result<Vec<u8>, KeyManagerError> {
    let selector = payload_selector(payload)?;
    let action = decode_action(payload)?;

    let permissions = host.get_permissions(controller);
    if permissions.is_empty() {
        return Err(KeyManagerError::NoPermissionsSet { controller });
    }
    check_reentrancy(controller, permissions, host.execution_context())?;

    let key_manager = host.key_manager();
    verify_action(&*host, key_manager, controller, permissions, value, &action)?;
    host.permissions_verified(controller, value, selector);

    let mut guard = ExecutionGuard::enter(host, controller);
    guard
        .forward(payload, value)
        .map_err(KeyManagerError::TargetReverted)
}
