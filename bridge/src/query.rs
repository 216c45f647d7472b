//! Query handlers for the lock proxy.
//!
//! Getters return raw bytes: hashes as stored (empty when unbound) and
//! amounts as Neo big-integer bytes.

use common::codec::uint256_to_neo_bytes;
use cosmwasm_std::Binary;

use crate::error::ContractError;
use crate::msg::AssetChainQuery;
use crate::service::NativeService;
use crate::state::{ASSET_HASHES, CROSSED_AMOUNTS, CROSSED_LIMITS, PROXY_HASHES};

/// Remote lock proxy bound for `to_chain_id`.
pub fn query_proxy_hash(
    native: &NativeService<'_>,
    to_chain_id: u64,
) -> Result<Binary, ContractError> {
    let proxy = native.current_contract();
    Ok(PROXY_HASHES
        .may_load(native.storage(), (proxy.as_bytes(), to_chain_id))?
        .unwrap_or_default())
}

/// Remote asset bound for a local asset on a chain.
pub fn query_asset_hash(
    native: &NativeService<'_>,
    query: AssetChainQuery,
) -> Result<Binary, ContractError> {
    let proxy = native.current_contract();
    let key = (
        proxy.as_bytes(),
        query.source_asset_hash.as_bytes(),
        query.to_chain_id,
    );
    Ok(ASSET_HASHES
        .may_load(native.storage(), key)?
        .unwrap_or_default())
}

pub fn query_crossed_amount(
    native: &NativeService<'_>,
    query: AssetChainQuery,
) -> Result<Binary, ContractError> {
    let proxy = native.current_contract();
    let key = (
        proxy.as_bytes(),
        query.source_asset_hash.as_bytes(),
        query.to_chain_id,
    );
    let amount = CROSSED_AMOUNTS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    Ok(Binary::from(uint256_to_neo_bytes(amount)))
}

pub fn query_crossed_limit(
    native: &NativeService<'_>,
    query: AssetChainQuery,
) -> Result<Binary, ContractError> {
    let proxy = native.current_contract();
    let key = (
        proxy.as_bytes(),
        query.source_asset_hash.as_bytes(),
        query.to_chain_id,
    );
    let limit = CROSSED_LIMITS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    Ok(Binary::from(uint256_to_neo_bytes(limit)))
}
