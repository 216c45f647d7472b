//! Incoming transfer handler (Unlock).
//!
//! Only reachable through the cross-chain manager after a message has been
//! proven and marked done. Releases custody to the recipient and gives the
//! amount back to the source chain's crossed-amount budget.

use common::{Address, Args, Decode, UnlockParam, BYTE_TRUE};
use cosmwasm_std::{Binary, Event, Uint256};

use crate::error::ContractError;
use crate::execute::outgoing::transfer_asset;
use crate::service::NativeService;
use crate::state::{CROSSED_AMOUNTS, PROXY_HASHES};

pub fn execute_unlock(
    native: &mut NativeService<'_>,
    params: UnlockParam,
) -> Result<Binary, ContractError> {
    let config = native.config();
    if !native.check_witness(&config.cross_chain_manager) {
        return Err(ContractError::NotCrossChainManager);
    }

    let args = Args::from_bytes(&params.args)?;
    let proxy = native.current_contract();

    // The message must come from the proxy we trust on the source chain
    let bound_proxy = PROXY_HASHES
        .may_load(native.storage(), (proxy.as_bytes(), params.from_chain_id))?
        .filter(|hash| !hash.is_empty())
        .ok_or(ContractError::ProxyNotBound {
            chain_id: params.from_chain_id,
        })?;
    if bound_proxy != params.from_contract_hash {
        return Err(ContractError::ProxyMismatch {
            chain_id: params.from_chain_id,
            got: hex::encode(params.from_contract_hash.as_slice()),
        });
    }

    let asset = Address::from_slice(&args.target_asset_hash)
        .ok()
        .filter(|asset| config.is_supported_asset(asset))
        .ok_or_else(|| ContractError::UnsupportedAsset {
            asset: hex::encode(args.target_asset_hash.as_slice()),
        })?;
    let to_address = Address::from_slice(&args.to_address)?;

    if args.value == 0 {
        return Ok(Binary::from(BYTE_TRUE));
    }

    transfer_asset(native, asset, proxy, to_address, args.value)?;

    let key = (proxy.as_bytes(), asset.as_bytes(), params.from_chain_id);
    let crossed = CROSSED_AMOUNTS
        .may_load(native.storage(), key)?
        .unwrap_or_default();
    let requested = Uint256::from(args.value);
    let new_crossed =
        crossed
            .checked_sub(requested)
            .map_err(|_| ContractError::CrossedAmountUnderflow { crossed, requested })?;
    CROSSED_AMOUNTS.save(native.storage_mut(), key, &new_crossed)?;

    native.notify(
        Event::new("unlock")
            .add_attribute("target_asset", asset.to_string())
            .add_attribute("to_address", to_address.to_string())
            .add_attribute("from_chain_id", params.from_chain_id.to_string())
            .add_attribute("amount", args.value.to_string()),
    );

    Ok(Binary::from(BYTE_TRUE))
}
