//! Operator role store.
//!
//! The operator is a governance role owned by the parameters contract. The
//! lock proxy consults it for `bindProxy`, `bindAsset` and `withdrawcntm`.

use common::Address;
use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::service::NativeService;

/// params contract -> operator
const OPERATOR: Map<&[u8], Address> = Map::new("operator");

/// Install the operator. Called at genesis and by governance upgrades.
pub fn set_operator(
    storage: &mut dyn Storage,
    params_contract: &Address,
    operator: &Address,
) -> StdResult<()> {
    OPERATOR.save(storage, params_contract.as_bytes(), operator)
}

pub fn operator(
    storage: &dyn Storage,
    params_contract: &Address,
) -> Result<Address, ContractError> {
    OPERATOR
        .may_load(storage, params_contract.as_bytes())?
        .ok_or(ContractError::OperatorNotSet)
}

/// Fails unless the current transaction carries the operator's witness.
pub fn require_operator(native: &NativeService<'_>) -> Result<(), ContractError> {
    let operator = operator(native.storage(), &native.config().params_contract)?;
    if !native.check_witness(&operator) {
        return Err(ContractError::NotOperator);
    }
    Ok(())
}
