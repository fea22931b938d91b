//! Decoding of the payload a controller wants the target account to run.

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::SolCall;

use crate::{
    errors::KeyManagerError,
    interfaces::{IERC725X, IERC725Y, ILSP14},
};

/// ERC725X operation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationType {
    Call,
    Create,
    Create2,
    StaticCall,
    DelegateCall,
}

impl OperationType {
    pub fn from_u256(operation: U256) -> Result<Self, KeyManagerError> {
        let kind = match operation.as_limbs() {
            [0, 0, 0, 0] => Self::Call,
            [1, 0, 0, 0] => Self::Create,
            [2, 0, 0, 0] => Self::Create2,
            [3, 0, 0, 0] => Self::StaticCall,
            [4, 0, 0, 0] => Self::DelegateCall,
            _ => return Err(KeyManagerError::UnknownOperationType { operation }),
        };
        Ok(kind)
    }

    pub fn as_u256(self) -> U256 {
        U256::from(self as u8)
    }

    pub fn is_deploy(self) -> bool {
        matches!(self, Self::Create | Self::Create2)
    }
}

/// One ERC725X operation, from `execute` or an element of `executeBatch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteOp {
    pub operation: OperationType,
    pub target: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `setData` and `setDataBatch`, flattened to `(key, value)` pairs.
    SetData(Vec<(FixedBytes<32>, Vec<u8>)>),
    Execute(ExecuteOp),
    ExecuteBatch(Vec<ExecuteOp>),
    TransferOwnership(Address),
    AcceptOwnership,
    RenounceOwnership,
    Unrecognized([u8; 4]),
}

pub fn payload_selector(payload: &[u8]) -> Result<[u8; 4], KeyManagerError> {
    let head = payload.get(..4).ok_or(KeyManagerError::InvalidPayload)?;
    let mut selector = [0u8; 4];
    selector.copy_from_slice(head);
    Ok(selector)
}

fn decode<C: SolCall>(payload: &[u8]) -> Result<C, KeyManagerError> {
    C::abi_decode(payload, true).map_err(|_| KeyManagerError::InvalidPayload)
}

pub fn decode_action(payload: &[u8]) -> Result<Action, KeyManagerError> {
    let selector = payload_selector(payload)?;

    let action = match selector {
        IERC725Y::setDataCall::SELECTOR => {
            let call: IERC725Y::setDataCall = decode(payload)?;
            Action::SetData(alloc::vec![(call.dataKey, call.dataValue.to_vec())])
        }
        IERC725Y::setDataBatchCall::SELECTOR => {
            let call: IERC725Y::setDataBatchCall = decode(payload)?;
            if call.dataKeys.len() != call.dataValues.len() {
                return Err(KeyManagerError::ERC725YDataKeysValuesLengthMismatch);
            }
            Action::SetData(
                call.dataKeys
                    .into_iter()
                    .zip(call.dataValues)
                    .map(|(k, v)| (k, v.to_vec()))
                    .collect(),
            )
        }
        IERC725X::executeCall::SELECTOR => {
            let call: IERC725X::executeCall = decode(payload)?;
            Action::Execute(ExecuteOp {
                operation: OperationType::from_u256(call.operationType)?,
                target: call.target,
                value: call.value,
                data: call.data.to_vec(),
            })
        }
        IERC725X::executeBatchCall::SELECTOR => {
            let call: IERC725X::executeBatchCall = decode(payload)?;
            let n = call.operationsType.len();
            if call.targets.len() != n || call.values.len() != n || call.datas.len() != n {
                return Err(KeyManagerError::BatchExecuteParamsLengthMismatch);
            }
            let mut ops = Vec::with_capacity(n);
            for i in 0..n {
                ops.push(ExecuteOp {
                    operation: OperationType::from_u256(call.operationsType[i])?,
                    target: call.targets[i],
                    value: call.values[i],
                    data: call.datas[i].to_vec(),
                });
            }
            Action::ExecuteBatch(ops)
        }
        ILSP14::transferOwnershipCall::SELECTOR => {
            let call: ILSP14::transferOwnershipCall = decode(payload)?;
            Action::TransferOwnership(call.newOwner)
        }
        ILSP14::acceptOwnershipCall::SELECTOR => Action::AcceptOwnership,
        ILSP14::renounceOwnershipCall::SELECTOR => Action::RenounceOwnership,
        other => Action::Unrecognized(other),
    };
    Ok(action)
}
