//! Seam to the general-purpose contract VM.
//!
//! Inbound messages addressed to anything other than the lock proxy are
//! routed to a VM-hosted contract as `method(args, fromContract, fromChainId)`.
//! The call counts as successful only when it returns a nonzero integer.

use common::Address;
use cosmwasm_std::Binary;

use crate::error::ContractError;
use crate::service::NativeService;

/// Largest byte string the VM will interpret as an integer.
const MAX_INTEGER_BYTES: usize = 32;

/// A routed call into the VM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmCall {
    pub contract: Address,
    pub method: String,
    pub args: Binary,
    pub from_contract: Binary,
    pub from_chain_id: u64,
}

/// Stack item returned by a VM contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VmValue {
    Null,
    Bool(bool),
    Integer(i128),
    ByteArray(Vec<u8>),
    Array(Vec<VmValue>),
}

impl VmValue {
    /// Truthiness under integer conversion; `None` when the value has no
    /// integer reading.
    pub fn as_nonzero_integer(&self) -> Option<bool> {
        match self {
            VmValue::Bool(b) => Some(*b),
            VmValue::Integer(i) => Some(*i != 0),
            // Neo integers are little-endian two's complement; zero is all
            // zero bytes (or empty) regardless of length.
            VmValue::ByteArray(bytes) if bytes.len() <= MAX_INTEGER_BYTES => {
                Some(bytes.iter().any(|b| *b != 0))
            }
            VmValue::ByteArray(_) | VmValue::Null | VmValue::Array(_) => None,
        }
    }
}

pub trait VmInvoker {
    fn invoke(&self, native: &mut NativeService<'_>, call: &VmCall)
        -> Result<VmValue, ContractError>;
}

/// Invoker for nodes without a VM: every routed call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVm;

impl VmInvoker for NoVm {
    fn invoke(
        &self,
        _native: &mut NativeService<'_>,
        call: &VmCall,
    ) -> Result<VmValue, ContractError> {
        Err(ContractError::VmCallFailed {
            contract: call.contract,
            method: call.method.clone(),
            reason: "no VM attached to this node".to_string(),
        })
    }
}
