//! Binding registry handlers.
//!
//! Operator-only configuration of the trusted remote proxy per chain and of
//! the remote asset and crossing limit per (asset, chain).

use common::{BindAssetParam, BindProxyParam, BYTE_TRUE};
use cosmwasm_std::{Binary, Event, StdError};

use crate::error::ContractError;
use crate::governance::require_operator;
use crate::service::NativeService;
use crate::state::{ASSET_HASHES, CROSSED_AMOUNTS, CROSSED_LIMITS, PROXY_HASHES};

/// Set the lock proxy trusted on `target_chain_id`. Overwrites any previous
/// binding.
pub fn execute_bind_proxy(
    native: &mut NativeService<'_>,
    params: BindProxyParam,
) -> Result<Binary, ContractError> {
    require_operator(native)?;

    let proxy = native.current_contract();
    PROXY_HASHES.save(
        native.storage_mut(),
        (proxy.as_bytes(), params.target_chain_id),
        &params.target_hash,
    )?;

    native.notify(
        Event::new("bind_proxy")
            .add_attribute("to_chain_id", params.target_chain_id.to_string())
            .add_attribute("target_proxy", hex::encode(params.target_hash.as_slice())),
    );

    Ok(Binary::from(BYTE_TRUE))
}

/// Bind the remote asset and raise the crossing limit. Limits only go up;
/// for target-chain assets the increase is credited to the crossed amount.
pub fn execute_bind_asset(
    native: &mut NativeService<'_>,
    params: BindAssetParam,
) -> Result<Binary, ContractError> {
    require_operator(native)?;

    let proxy = native.current_contract();
    let key = (
        proxy.as_bytes(),
        params.source_asset_hash.as_bytes(),
        params.target_chain_id,
    );

    let stored_limit = CROSSED_LIMITS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    if params.limit <= stored_limit {
        return Err(ContractError::LimitNotIncreasing {
            new_limit: params.limit,
            stored_limit,
        });
    }

    if params.is_target_chain_asset {
        let increment = params
            .limit
            .checked_sub(stored_limit)
            .map_err(StdError::from)?;
        let crossed = CROSSED_AMOUNTS
            .may_load(native.storage(), key)?
            .unwrap_or_default();
        let new_crossed = crossed
            .checked_add(increment)
            .map_err(|_| ContractError::CrossedAmountOverflow)?;
        CROSSED_AMOUNTS.save(native.storage_mut(), key, &new_crossed)?;
    }

    ASSET_HASHES.save(native.storage_mut(), key, &params.target_asset_hash)?;
    CROSSED_LIMITS.save(native.storage_mut(), key, &params.limit)?;

    native.notify(
        Event::new("bind_asset")
            .add_attribute("source_asset", params.source_asset_hash.to_string())
            .add_attribute("to_chain_id", params.target_chain_id.to_string())
            .add_attribute(
                "target_asset",
                hex::encode(params.target_asset_hash.as_slice()),
            )
            .add_attribute("limit", params.limit.to_string())
            .add_attribute(
                "is_target_chain_asset",
                params.is_target_chain_asset.to_string(),
            ),
    );

    Ok(Binary::from(BYTE_TRUE))
}
