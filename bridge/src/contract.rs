//! Native Bridge Contracts - Entry Points
//!
//! Each native contract exposes one entry that decodes `(method, input)` and
//! dispatches to its handler. The implementation is modularized into:
//! - `execute/` - state-changing handlers
//! - `query` - lock proxy getters
//! - `asset` - the native fungible asset contract

use cosmwasm_std::Binary;

use crate::asset::{
    execute_approve, execute_transfer, execute_transfer_from, query_allowance, query_balance,
    query_decimals, query_name, query_symbol, query_total_supply,
};
use crate::config::BridgeConfig;
use crate::error::ContractError;
use crate::execute::{
    execute_bind_asset, execute_bind_proxy, execute_create_cross_chain_tx, execute_lock,
    execute_process_cross_chain_tx, execute_unlock, execute_withdraw_cntm,
};
use crate::msg::{AssetMsg, LockProxyMsg, ManagerMsg};
use crate::query::{query_asset_hash, query_crossed_amount, query_crossed_limit, query_proxy_hash};
use crate::registry::ContractRegistry;
use crate::service::NativeService;

pub const CROSS_CHAIN_MANAGER_NAME: &str = "CrossChainManager";
pub const LOCK_PROXY_NAME: &str = "LockProxy";
pub const NATIVE_TOKEN_NAME: &str = "NativeToken";
pub const GAS_TOKEN_NAME: &str = "GasToken";

/// Install every native contract at the address the configuration assigns it.
pub fn register_contracts(registry: &mut ContractRegistry, config: &BridgeConfig) {
    registry.register(
        config.cross_chain_manager,
        CROSS_CHAIN_MANAGER_NAME,
        cross_chain_manager,
    );
    registry.register(config.lock_proxy, LOCK_PROXY_NAME, lock_proxy);
    registry.register(config.native_token, NATIVE_TOKEN_NAME, native_asset);
    registry.register(config.gas_token, GAS_TOKEN_NAME, native_asset);
}

// ============================================================================
// Cross-Chain Manager
// ============================================================================

pub fn cross_chain_manager(
    native: &mut NativeService<'_>,
    method: &str,
) -> Result<Binary, ContractError> {
    match ManagerMsg::parse(method, native.input())? {
        ManagerMsg::CreateCrossChainTx(params) => execute_create_cross_chain_tx(native, params),
        ManagerMsg::ProcessCrossChainTx(params) => execute_process_cross_chain_tx(native, params),
    }
}

// ============================================================================
// Lock Proxy
// ============================================================================

pub fn lock_proxy(native: &mut NativeService<'_>, method: &str) -> Result<Binary, ContractError> {
    match LockProxyMsg::parse(method, native.input())? {
        // Execute
        LockProxyMsg::Lock(params) => execute_lock(native, params),
        LockProxyMsg::Unlock(params) => execute_unlock(native, params),
        LockProxyMsg::BindProxy(params) => execute_bind_proxy(native, params),
        LockProxyMsg::BindAsset(params) => execute_bind_asset(native, params),
        LockProxyMsg::WithdrawCntm { to_address } => execute_withdraw_cntm(native, to_address),

        // Query
        LockProxyMsg::GetProxyHash { to_chain_id } => query_proxy_hash(native, to_chain_id),
        LockProxyMsg::GetAssetHash(query) => query_asset_hash(native, query),
        LockProxyMsg::GetCrossedAmount(query) => query_crossed_amount(native, query),
        LockProxyMsg::GetCrossedLimit(query) => query_crossed_limit(native, query),
    }
}

// ============================================================================
// Native Asset
// ============================================================================

pub fn native_asset(native: &mut NativeService<'_>, method: &str) -> Result<Binary, ContractError> {
    match AssetMsg::parse(method, native.input())? {
        AssetMsg::Transfer(transfers) => execute_transfer(native, transfers),
        AssetMsg::TransferFrom(params) => execute_transfer_from(native, params),
        AssetMsg::Approve(state) => execute_approve(native, state),
        AssetMsg::Allowance(params) => query_allowance(native, &params.from, &params.to),
        AssetMsg::BalanceOf { address } => query_balance(native, &address),
        AssetMsg::Name => Ok(query_name(native)),
        AssetMsg::Symbol => Ok(query_symbol(native)),
        AssetMsg::Decimals => Ok(query_decimals(native)),
        AssetMsg::TotalSupply => query_total_supply(native),
    }
}
