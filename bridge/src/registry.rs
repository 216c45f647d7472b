//! Native contract registry
//!
//! The node builds one [`ContractRegistry`] at startup and hands it to the
//! runtime; nothing is registered through global state.

use std::collections::BTreeMap;

use common::Address;
use cosmwasm_std::Binary;

use crate::error::ContractError;
use crate::service::NativeService;

/// Contract entry point: dispatches `method` against the service's current input.
pub type NativeEntry = fn(&mut NativeService<'_>, &str) -> Result<Binary, ContractError>;

#[derive(Clone, Copy)]
pub struct NativeContract {
    pub name: &'static str,
    pub entry: NativeEntry,
}

impl std::fmt::Debug for NativeContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeContract")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<Address, NativeContract>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the contract living at `address`.
    pub fn register(&mut self, address: Address, name: &'static str, entry: NativeEntry) {
        self.contracts
            .insert(address, NativeContract { name, entry });
    }

    pub fn get(&self, address: &Address) -> Option<&NativeContract> {
        self.contracts.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.contracts.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
