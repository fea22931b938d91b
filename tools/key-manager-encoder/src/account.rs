//! In-memory ERC725 account owned by a key manager, for exercising the dispatcher off-chain.
//!
//! `MemoryAccount` plays every role the on-chain contract delegates to the outside world: the
//! ERC725X/Y account with LSP14 ownership, the key manager's own storage, the clock and
//! signature recovery. Call targets can be given hooks that call back into the key manager or
//! into the account itself, which is how reentrancy is exercised. Controllers calling the
//! account directly go through the owner's LSP20 verification.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::{sol, SolError};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use key_manager_core::{
    constants::{
        LSP20_VERIFY_CALL_WITH_POST_VERIFICATION, RENOUNCE_OWNERSHIP_CONFIRMATION_DELAY,
        RENOUNCE_OWNERSHIP_CONFIRMATION_PERIOD,
    },
    data_keys::permissions_key,
    decode_action, dispatcher, has_low_s,
    interfaces::{
        ERC725X_InsufficientBalance, ERC725X_MsgValueDisallowedInStaticCall,
        NotInRenounceOwnershipInterval,
    },
    Action, ExecuteOp, ExecutionContext, Host, InterfaceDetector, KeyManagerError,
    MemoryNonceLedger, NonceLedger, OperationType, PermissionStore, Permissions,
};

use crate::{encoder::address_of, encoder::keccak256_bytes, types::RelayCall};

sol! {
    error OwnableCallerNotTheOwner(address callerAddress);
    error LSP14CallerNotPendingOwner(address caller);
}

/// What a call target does when the account calls it.
#[derive(Clone, Debug)]
pub enum Hook {
    /// Calls `execute(payload)` on the key manager with the target as `msg.sender`.
    Execute(Vec<u8>),
    /// Submits a signed relay call to the key manager.
    Relay(RelayCall),
    /// Calls the account directly with the target as the caller.
    Direct(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountEvent {
    PermissionsVerified {
        signer: Address,
        value: U256,
        selector: [u8; 4],
    },
    DataChanged {
        key: FixedBytes<32>,
    },
    Executed {
        operation: OperationType,
        target: Address,
        value: U256,
    },
    OwnershipTransferStarted {
        previous_owner: Address,
        new_owner: Address,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    RenounceOwnershipStarted,
    OwnershipRenounced,
}

/// Everything a failed invocation rolls back.
#[derive(Clone, Debug, Default)]
pub struct AccountState {
    pub data: BTreeMap<FixedBytes<32>, Vec<u8>>,
    pub nonces: MemoryNonceLedger,
    pub balances: BTreeMap<Address, U256>,
    pub owner: Address,
    pub pending_owner: Address,
    /// Block of the first `renounceOwnership`, zero when no renounce is in progress.
    pub renounce_started_at: u64,
    pub calls: Vec<ExecuteOp>,
    pub events: Vec<AccountEvent>,
}

pub struct MemoryAccount {
    pub state: AccountState,
    pub address: Address,
    pub key_manager: Address,
    pub chain_id: u64,
    pub block_number: u64,
    pub timestamp: u64,
    /// `(contract, interfaceId)` pairs answered `true` by ERC-165.
    pub interfaces: BTreeSet<(Address, [u8; 4])>,
    pub hooks: BTreeMap<Address, Hook>,
    /// Errors returned to hooks by nested key manager calls, kept across rollbacks.
    pub hook_errors: Vec<KeyManagerError>,
    context: ExecutionContext,
}

impl MemoryAccount {
    pub fn new(address: Address, key_manager: Address, chain_id: u64) -> Self {
        let state = AccountState {
            owner: key_manager,
            ..AccountState::default()
        };
        Self {
            state,
            address,
            key_manager,
            chain_id,
            block_number: 1,
            timestamp: 1_700_000_000,
            interfaces: BTreeSet::new(),
            hooks: BTreeMap::new(),
            hook_errors: Vec::new(),
            context: ExecutionContext::default(),
        }
    }

    pub fn set_data(&mut self, key: FixedBytes<32>, value: Vec<u8>) {
        self.state.data.insert(key, value);
    }

    pub fn grant(&mut self, controller: Address, permissions: Permissions) {
        self.set_data(permissions_key(controller), permissions.to_be_bytes().to_vec());
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.state.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn fund(&mut self, amount: U256) {
        let balance = self.balance_of(self.address);
        self.state.balances.insert(self.address, balance + amount);
    }

    /// Advance the chain by `blocks` blocks of 12 seconds.
    pub fn mine(&mut self, blocks: u64) {
        self.block_number += blocks;
        self.timestamp += blocks * 12;
    }

    /// A controller calling the account itself rather than the key manager. The account asks its
    /// owner to verify the call first and, when told to, reports back once the call is done.
    pub fn execute_from(
        &mut self,
        caller: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<Vec<u8>, KeyManagerError> {
        let checkpoint = self.state.clone();
        let result = self.verified_apply(caller, value, payload);
        if result.is_err() {
            self.state = checkpoint;
        }
        result
    }

    fn verified_apply(
        &mut self,
        caller: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<Vec<u8>, KeyManagerError> {
        if self.state.owner != self.key_manager {
            return Err(KeyManagerError::TargetReverted(
                OwnableCallerNotTheOwner {
                    callerAddress: caller,
                }
                .abi_encode(),
            ));
        }
        let account = self.address;
        let status = dispatcher::lsp20_verify_call(self, account, caller, value, payload)?;

        self.fund(value);
        let result = self.apply(caller, payload);
        if status == LSP20_VERIFY_CALL_WITH_POST_VERIFICATION {
            dispatcher::lsp20_verify_call_result(self, account);
        }
        result.map_err(KeyManagerError::TargetReverted)
    }

    fn only_owner(&self) -> Result<(), Vec<u8>> {
        if self.state.owner != self.key_manager {
            return Err(OwnableCallerNotTheOwner {
                callerAddress: self.key_manager,
            }
            .abi_encode());
        }
        Ok(())
    }

    fn run_operation(&mut self, op: ExecuteOp) -> Result<Vec<u8>, Vec<u8>> {
        if op.operation == OperationType::StaticCall && !op.value.is_zero() {
            return Err(ERC725X_MsgValueDisallowedInStaticCall {}.abi_encode());
        }
        let balance = self.balance_of(self.address);
        if op.value > balance {
            return Err(ERC725X_InsufficientBalance {
                balance,
                value: op.value,
            }
            .abi_encode());
        }
        if !op.value.is_zero() {
            self.state.balances.insert(self.address, balance - op.value);
            let received = self.balance_of(op.target);
            self.state.balances.insert(op.target, received + op.value);
        }

        self.state.events.push(AccountEvent::Executed {
            operation: op.operation,
            target: op.target,
            value: op.value,
        });
        self.state.calls.push(op.clone());

        if op.operation.is_deploy() {
            let created = keccak256_bytes(&[self.address.as_slice(), op.data.as_slice()].concat());
            return Ok(created[12..].to_vec());
        }
        match op.operation {
            OperationType::Call => self.call_hook(op.target),
            _ => Ok(Vec::new()),
        }
    }

    fn call_hook(&mut self, target: Address) -> Result<Vec<u8>, Vec<u8>> {
        let Some(hook) = self.hooks.get(&target).cloned() else {
            return Ok(Vec::new());
        };
        let result = match hook {
            Hook::Execute(payload) => dispatcher::execute(self, target, U256::ZERO, &payload),
            Hook::Relay(call) => dispatcher::execute_relay_call(
                self,
                call.value,
                &call.signature,
                call.nonce,
                call.validity_timestamps,
                &call.payload,
            ),
            Hook::Direct(payload) => self.execute_from(target, U256::ZERO, &payload),
        };
        result.map_err(|err| {
            self.hook_errors.push(err);
            Vec::new()
        })
    }

    /// Run a decoded ERC725X/Y or LSP14 call as if `caller` sent it to the account.
    fn apply(&mut self, caller: Address, payload: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let action = decode_action(payload).map_err(|_| Vec::new())?;
        match action {
            Action::SetData(entries) => {
                for (key, data) in entries {
                    self.state.events.push(AccountEvent::DataChanged { key });
                    self.state.data.insert(key, data);
                }
                Ok(Vec::new())
            }
            Action::Execute(op) => self.run_operation(op),
            Action::ExecuteBatch(ops) => {
                for op in ops {
                    self.run_operation(op)?;
                }
                Ok(Vec::new())
            }
            Action::TransferOwnership(new_owner) => {
                self.state.pending_owner = new_owner;
                self.state.events.push(AccountEvent::OwnershipTransferStarted {
                    previous_owner: self.state.owner,
                    new_owner,
                });
                Ok(Vec::new())
            }
            Action::AcceptOwnership => {
                if self.state.pending_owner != caller {
                    return Err(LSP14CallerNotPendingOwner { caller }.abi_encode());
                }
                self.state.events.push(AccountEvent::OwnershipTransferred {
                    previous_owner: self.state.owner,
                    new_owner: caller,
                });
                self.state.owner = caller;
                self.state.pending_owner = Address::ZERO;
                Ok(Vec::new())
            }
            Action::RenounceOwnership => self.renounce_ownership(),
            Action::Unrecognized(_) => Err(Vec::new()),
        }
    }

    /// LSP14 two-step renounce, measured in blocks.
    fn renounce_ownership(&mut self) -> Result<Vec<u8>, Vec<u8>> {
        let now = self.block_number;
        let start = self.state.renounce_started_at + RENOUNCE_OWNERSHIP_CONFIRMATION_DELAY;
        let end = start + RENOUNCE_OWNERSHIP_CONFIRMATION_PERIOD;

        if self.state.renounce_started_at == 0 || now > end {
            self.state.renounce_started_at = now;
            self.state.events.push(AccountEvent::RenounceOwnershipStarted);
            return Ok(Vec::new());
        }
        if now < start {
            return Err(NotInRenounceOwnershipInterval {
                renounceOwnershipStart: U256::from(start),
                renounceOwnershipEnd: U256::from(end),
            }
            .abi_encode());
        }

        self.state.owner = Address::ZERO;
        self.state.pending_owner = Address::ZERO;
        self.state.renounce_started_at = 0;
        self.state.events.push(AccountEvent::OwnershipRenounced);
        Ok(Vec::new())
    }
}

impl PermissionStore for MemoryAccount {
    fn get_data(&self, key: FixedBytes<32>) -> Vec<u8> {
        self.state.data.get_data(key)
    }
}

impl InterfaceDetector for MemoryAccount {
    fn supports_interface(&self, account: Address, interface_id: [u8; 4]) -> bool {
        self.interfaces.contains(&(account, interface_id))
    }
}

impl NonceLedger for MemoryAccount {
    fn load_nonce(&self, controller: Address, channel: u128) -> u128 {
        self.state.nonces.load_nonce(controller, channel)
    }

    fn store_nonce(&mut self, controller: Address, channel: u128, counter: u128) {
        self.state.nonces.store_nonce(controller, channel, counter);
    }
}

impl Host for MemoryAccount {
    type Checkpoint = AccountState;

    fn key_manager(&self) -> Address {
        self.key_manager
    }

    fn target(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn block_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8]) -> Address {
        if !has_low_s(signature) {
            return Address::ZERO;
        }
        let v = match signature[64] {
            27 | 28 => signature[64] - 27,
            0 | 1 => signature[64],
            _ => return Address::ZERO,
        };
        let (Ok(sig), Some(recovery_id)) =
            (Signature::from_slice(&signature[..64]), RecoveryId::from_byte(v))
        else {
            return Address::ZERO;
        };
        VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
            .map(|key| address_of(&key))
            .unwrap_or(Address::ZERO)
    }

    /// The account side of a key manager call: the key manager is the caller and must own the
    /// account.
    fn forward(&mut self, payload: &[u8], value: U256) -> Result<Vec<u8>, Vec<u8>> {
        self.only_owner()?;
        self.fund(value);
        let key_manager = self.key_manager;
        self.apply(key_manager, payload)
    }

    fn execution_context(&self) -> ExecutionContext {
        self.context
    }

    fn set_execution_context(&mut self, context: ExecutionContext) {
        self.context = context;
    }

    fn checkpoint(&mut self) -> AccountState {
        self.state.clone()
    }

    fn revert(&mut self, checkpoint: AccountState) {
        self.state = checkpoint;
    }

    fn permissions_verified(&mut self, signer: Address, value: U256, selector: [u8; 4]) {
        self.state.events.push(AccountEvent::PermissionsVerified {
            signer,
            value,
            selector,
        });
    }
}
