//! Per-transaction execution context handed to native contracts.
//!
//! A [`NativeService`] owns the call stack of one transaction: the current
//! and calling contract, the current method input, the witness set, and the
//! outputs (notifications and cross-state leaves) gathered along the way.
//! Nested calls are plain function calls that swap the frame in and out.

use common::Address;
use cosmwasm_std::{Binary, Event, Storage};
use tracing::debug;

use crate::config::BridgeConfig;
use crate::error::ContractError;
use crate::runtime::{InvokeTx, NativeRuntime, Notification};
use crate::vm::{VmCall, VmValue};

pub struct NativeService<'a> {
    runtime: &'a NativeRuntime,
    storage: &'a mut dyn Storage,
    tx: &'a InvokeTx,
    tx_hash: [u8; 32],
    height: u32,
    current: Address,
    caller: Option<Address>,
    input: Binary,
    notifications: Vec<Notification>,
    cross_states: Vec<Binary>,
}

impl<'a> NativeService<'a> {
    pub(crate) fn new(
        runtime: &'a NativeRuntime,
        storage: &'a mut dyn Storage,
        tx: &'a InvokeTx,
        height: u32,
    ) -> Self {
        Self {
            runtime,
            storage,
            tx,
            tx_hash: tx.hash(),
            height,
            current: tx.contract,
            caller: None,
            input: tx.input.clone(),
            notifications: Vec::new(),
            cross_states: Vec::new(),
        }
    }

    pub fn runtime(&self) -> &'a NativeRuntime {
        self.runtime
    }

    pub fn config(&self) -> &'a BridgeConfig {
        self.runtime.config()
    }

    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut *self.storage
    }

    /// Raw input of the method currently executing.
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn current_contract(&self) -> Address {
        self.current
    }

    /// Contract that invoked the current one; `None` at transaction entry.
    pub fn calling_contract(&self) -> Option<Address> {
        self.caller
    }

    pub fn tx_hash(&self) -> [u8; 32] {
        self.tx_hash
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `address` signed the transaction or is the contract calling us.
    pub fn check_witness(&self, address: &Address) -> bool {
        self.tx.signers.contains(address) || self.caller.as_ref() == Some(address)
    }

    pub fn require_witness(&self, address: &Address) -> Result<(), ContractError> {
        if self.check_witness(address) {
            Ok(())
        } else {
            Err(ContractError::MissingWitness { address: *address })
        }
    }

    /// Invoke the entry of the current contract with the current input.
    pub(crate) fn invoke_current(&mut self, method: &str) -> Result<Binary, ContractError> {
        let contract = self.current;
        let native = self
            .runtime
            .registry()
            .get(&contract)
            .copied()
            .ok_or(ContractError::UnknownContract { address: contract })?;
        (native.entry)(self, method)
    }

    /// Synchronously call `method` on another native contract. The callee
    /// sees the current contract as its caller.
    pub fn native_call(
        &mut self,
        contract: Address,
        method: &str,
        args: Binary,
    ) -> Result<Binary, ContractError> {
        debug!(
            caller = %self.current,
            contract = %contract,
            method,
            "native call"
        );

        let saved_input = std::mem::replace(&mut self.input, args);
        let saved_caller = self.caller.replace(self.current);
        let saved_current = std::mem::replace(&mut self.current, contract);

        let result = self.invoke_current(method);

        self.current = saved_current;
        self.caller = saved_caller;
        self.input = saved_input;
        result
    }

    /// Route a call to a VM-hosted contract through the runtime's invoker.
    pub fn vm_call(&mut self, call: &VmCall) -> Result<VmValue, ContractError> {
        debug!(
            caller = %self.current,
            contract = %call.contract,
            method = %call.method,
            from_chain_id = call.from_chain_id,
            "vm call"
        );

        let runtime = self.runtime;
        let saved_caller = self.caller.replace(self.current);
        let saved_current = std::mem::replace(&mut self.current, call.contract);

        let result = runtime.vm_invoker().invoke(self, call);

        self.current = saved_current;
        self.caller = saved_caller;
        result
    }

    /// Append a leaf to the block's cross-state accumulator.
    pub fn push_cross_state(&mut self, value: impl Into<Binary>) {
        self.cross_states.push(value.into());
    }

    /// Record a notification from the current contract, if event logging is on.
    pub fn notify(&mut self, event: Event) {
        if self.runtime.config().enable_event_log {
            self.notifications.push(Notification {
                contract: self.current,
                event,
            });
        }
    }

    pub(crate) fn into_outputs(self) -> (Vec<Notification>, Vec<Binary>) {
        (self.notifications, self.cross_states)
    }
}
