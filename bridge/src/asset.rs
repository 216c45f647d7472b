//! Native fungible asset contract.
//!
//! The native token and the gas token run this same contract at two
//! well-known addresses; all state is keyed by the asset's own address.
//! Balances of zero are deleted rather than stored.

use common::codec::u64_to_neo_bytes;
use common::{Address, TransferFrom, TransferState, Transfers, BYTE_FALSE, BYTE_TRUE};
use cosmwasm_std::{Binary, Event, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::service::NativeService;

/// (asset, holder) -> balance
const BALANCES: Map<(&[u8], &[u8]), u64> = Map::new("balance");

/// (asset, owner, spender) -> approved amount
const ALLOWANCES: Map<(&[u8], &[u8], &[u8]), u64> = Map::new("allowance");

/// asset -> total supply
const TOTAL_SUPPLY: Map<&[u8], u64> = Map::new("totalSupply");

/// Display metadata of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u64,
}

pub const NATIVE_TOKEN_INFO: AssetInfo = AssetInfo {
    name: "CNTM Token",
    symbol: "CNTM",
    decimals: 0,
};

pub const GAS_TOKEN_INFO: AssetInfo = AssetInfo {
    name: "CNTM Gas",
    symbol: "CNTG",
    decimals: 9,
};

fn asset_info(native: &NativeService<'_>) -> AssetInfo {
    if native.current_contract() == native.config().gas_token {
        GAS_TOKEN_INFO
    } else {
        NATIVE_TOKEN_INFO
    }
}

// ============================================================================
// Storage helpers
// ============================================================================

pub fn balance_of(storage: &dyn Storage, asset: &Address, holder: &Address) -> StdResult<u64> {
    Ok(BALANCES
        .may_load(storage, (asset.as_bytes(), holder.as_bytes()))?
        .unwrap_or_default())
}

fn set_balance(
    storage: &mut dyn Storage,
    asset: &Address,
    holder: &Address,
    amount: u64,
) -> StdResult<()> {
    let key = (asset.as_bytes(), holder.as_bytes());
    if amount == 0 {
        BALANCES.remove(storage, key);
        Ok(())
    } else {
        BALANCES.save(storage, key, &amount)
    }
}

pub fn allowance_of(
    storage: &dyn Storage,
    asset: &Address,
    owner: &Address,
    spender: &Address,
) -> StdResult<u64> {
    Ok(ALLOWANCES
        .may_load(storage, (asset.as_bytes(), owner.as_bytes(), spender.as_bytes()))?
        .unwrap_or_default())
}

fn set_allowance(
    storage: &mut dyn Storage,
    asset: &Address,
    owner: &Address,
    spender: &Address,
    amount: u64,
) -> StdResult<()> {
    let key = (asset.as_bytes(), owner.as_bytes(), spender.as_bytes());
    if amount == 0 {
        ALLOWANCES.remove(storage, key);
        Ok(())
    } else {
        ALLOWANCES.save(storage, key, &amount)
    }
}

pub fn total_supply(storage: &dyn Storage, asset: &Address) -> StdResult<u64> {
    Ok(TOTAL_SUPPLY
        .may_load(storage, asset.as_bytes())?
        .unwrap_or_default())
}

fn move_balance(
    storage: &mut dyn Storage,
    asset: &Address,
    from: &Address,
    to: &Address,
    value: u64,
) -> Result<(), ContractError> {
    let from_balance = balance_of(storage, asset, from)?;
    if from_balance < value {
        return Err(ContractError::InsufficientBalance {
            balance: from_balance,
            requested: value,
        });
    }
    set_balance(storage, asset, from, from_balance - value)?;

    let to_balance = balance_of(storage, asset, to)?;
    let to_balance = to_balance
        .checked_add(value)
        .ok_or(ContractError::BalanceOverflow)?;
    set_balance(storage, asset, to, to_balance)?;
    Ok(())
}

// ============================================================================
// Genesis
// ============================================================================

/// Credit `amount` to `holder` and grow the supply. Genesis only.
pub fn init_balance(
    storage: &mut dyn Storage,
    asset: &Address,
    holder: &Address,
    amount: u64,
) -> Result<(), ContractError> {
    let supply = total_supply(storage, asset)?
        .checked_add(amount)
        .ok_or(ContractError::BalanceOverflow)?;
    let balance = balance_of(storage, asset, holder)?
        .checked_add(amount)
        .ok_or(ContractError::BalanceOverflow)?;
    TOTAL_SUPPLY.save(storage, asset.as_bytes(), &supply)?;
    set_balance(storage, asset, holder, balance)?;
    Ok(())
}

/// Install an allowance without a witness. Genesis only.
pub fn init_allowance(
    storage: &mut dyn Storage,
    asset: &Address,
    owner: &Address,
    spender: &Address,
    amount: u64,
) -> StdResult<()> {
    set_allowance(storage, asset, owner, spender, amount)
}

// ============================================================================
// Handlers
// ============================================================================

fn transfer_event(from: &Address, to: &Address, value: u64) -> Event {
    Event::new("transfer")
        .add_attribute("from", from.to_string())
        .add_attribute("to", to.to_string())
        .add_attribute("amount", value.to_string())
}

/// Each state needs the witness of its `from`; zero-value states move nothing.
pub fn execute_transfer(
    native: &mut NativeService<'_>,
    transfers: Transfers,
) -> Result<Binary, ContractError> {
    let asset = native.current_contract();
    for state in transfers.states {
        native.require_witness(&state.from)?;
        if state.value == 0 {
            continue;
        }
        move_balance(
            native.storage_mut(),
            &asset,
            &state.from,
            &state.to,
            state.value,
        )?;
        native.notify(transfer_event(&state.from, &state.to, state.value));
    }
    Ok(Binary::from(BYTE_TRUE))
}

pub fn execute_transfer_from(
    native: &mut NativeService<'_>,
    params: TransferFrom,
) -> Result<Binary, ContractError> {
    native.require_witness(&params.sender)?;
    if params.value == 0 {
        return Ok(Binary::from(BYTE_FALSE));
    }

    let asset = native.current_contract();
    let allowance = allowance_of(native.storage(), &asset, &params.from, &params.sender)?;
    if allowance < params.value {
        return Err(ContractError::InsufficientAllowance {
            allowance,
            requested: params.value,
        });
    }
    set_allowance(
        native.storage_mut(),
        &asset,
        &params.from,
        &params.sender,
        allowance - params.value,
    )?;
    move_balance(
        native.storage_mut(),
        &asset,
        &params.from,
        &params.to,
        params.value,
    )?;

    native.notify(transfer_event(&params.from, &params.to, params.value));
    Ok(Binary::from(BYTE_TRUE))
}

pub fn execute_approve(
    native: &mut NativeService<'_>,
    state: TransferState,
) -> Result<Binary, ContractError> {
    native.require_witness(&state.from)?;
    let asset = native.current_contract();
    set_allowance(native.storage_mut(), &asset, &state.from, &state.to, state.value)?;

    native.notify(
        Event::new("approve")
            .add_attribute("owner", state.from.to_string())
            .add_attribute("spender", state.to.to_string())
            .add_attribute("amount", state.value.to_string()),
    );
    Ok(Binary::from(BYTE_TRUE))
}

pub fn query_allowance(
    native: &NativeService<'_>,
    owner: &Address,
    spender: &Address,
) -> Result<Binary, ContractError> {
    let asset = native.current_contract();
    let amount = allowance_of(native.storage(), &asset, owner, spender)?;
    Ok(Binary::from(u64_to_neo_bytes(amount)))
}

pub fn query_balance(
    native: &NativeService<'_>,
    holder: &Address,
) -> Result<Binary, ContractError> {
    let asset = native.current_contract();
    let amount = balance_of(native.storage(), &asset, holder)?;
    Ok(Binary::from(u64_to_neo_bytes(amount)))
}

pub fn query_total_supply(native: &NativeService<'_>) -> Result<Binary, ContractError> {
    let asset = native.current_contract();
    let amount = total_supply(native.storage(), &asset)?;
    Ok(Binary::from(u64_to_neo_bytes(amount)))
}

pub fn query_name(native: &NativeService<'_>) -> Binary {
    Binary::from(asset_info(native).name.as_bytes())
}

pub fn query_symbol(native: &NativeService<'_>) -> Binary {
    Binary::from(asset_info(native).symbol.as_bytes())
}

pub fn query_decimals(native: &NativeService<'_>) -> Binary {
    Binary::from(u64_to_neo_bytes(asset_info(native).decimals))
}
