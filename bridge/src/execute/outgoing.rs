//! Outgoing transfer handler (Lock).
//!
//! Takes custody of a supported asset, charges the transfer against the
//! destination's crossed-amount limit and hands an `unlock` message to the
//! cross-chain manager.

use common::{
    Address, Args, CreateCrossChainTxParam, Encode, LockParam, Transfers, BYTE_FALSE, BYTE_TRUE,
};
use cosmwasm_std::{Binary, Event, Uint256};

use crate::error::ContractError;
use crate::msg::{CREATE_CROSS_CHAIN_TX, TRANSFER, UNLOCK};
use crate::service::NativeService;
use crate::state::{ASSET_HASHES, CROSSED_AMOUNTS, CROSSED_LIMITS, PROXY_HASHES};

pub fn execute_lock(
    native: &mut NativeService<'_>,
    params: LockParam,
) -> Result<Binary, ContractError> {
    if params.value == 0 {
        return Ok(Binary::from(BYTE_FALSE));
    }

    let config = native.config();
    let asset = params.source_asset_hash;
    if !config.is_supported_asset(&asset) {
        return Err(ContractError::UnsupportedAsset {
            asset: asset.to_string(),
        });
    }

    let proxy = native.current_contract();
    transfer_asset(native, asset, params.from_address, proxy, params.value)?;

    // Charge the transfer against the limit
    let key = (proxy.as_bytes(), asset.as_bytes(), params.to_chain_id);
    let crossed = CROSSED_AMOUNTS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    let limit = CROSSED_LIMITS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    let new_crossed = crossed
        .checked_add(Uint256::from(params.value))
        .map_err(|_| ContractError::CrossedAmountOverflow)?;
    if new_crossed > limit {
        return Err(ContractError::LimitExceeded {
            crossed: new_crossed,
            limit,
        });
    }
    CROSSED_AMOUNTS.save(native.storage_mut(), key, &new_crossed)?;

    let target_proxy = PROXY_HASHES
        .may_load(native.storage(), (proxy.as_bytes(), params.to_chain_id))?
        .filter(|hash| !hash.is_empty())
        .ok_or(ContractError::ProxyNotBound {
            chain_id: params.to_chain_id,
        })?;
    let target_asset = ASSET_HASHES
        .may_load(native.storage(), key)?
        .filter(|hash| !hash.is_empty())
        .ok_or(ContractError::AssetNotBound {
            asset,
            chain_id: params.to_chain_id,
        })?;

    let args = Args {
        target_asset_hash: target_asset.clone(),
        to_address: params.to_address.clone(),
        value: params.value,
    };
    let request = CreateCrossChainTxParam {
        to_chain_id: params.to_chain_id,
        to_contract_address: target_proxy.clone(),
        method: UNLOCK.to_string(),
        args: Binary::from(args.to_bytes()),
    };
    native.native_call(
        config.cross_chain_manager,
        CREATE_CROSS_CHAIN_TX,
        Binary::from(request.to_bytes()),
    )?;

    native.notify(
        Event::new("lock")
            .add_attribute("source_asset", asset.to_string())
            .add_attribute("from_address", params.from_address.to_string())
            .add_attribute("to_chain_id", params.to_chain_id.to_string())
            .add_attribute("target_proxy", hex::encode(target_proxy.as_slice()))
            .add_attribute("target_asset", hex::encode(target_asset.as_slice()))
            .add_attribute("to_address", hex::encode(params.to_address.as_slice()))
            .add_attribute("amount", params.value.to_string()),
    );

    Ok(Binary::from(BYTE_TRUE))
}

/// Move `value` of `asset` from `from` to `to` through the asset contract.
pub(crate) fn transfer_asset(
    native: &mut NativeService<'_>,
    asset: Address,
    from: Address,
    to: Address,
    value: u64,
) -> Result<(), ContractError> {
    let transfer = Transfers::single(from, to, value);
    let result = native.native_call(asset, TRANSFER, Binary::from(transfer.to_bytes()))?;
    if result.as_slice() != BYTE_TRUE {
        return Err(ContractError::NativeCallFalse {
            contract: asset.to_string(),
            method: TRANSFER.to_string(),
        });
    }
    Ok(())
}
