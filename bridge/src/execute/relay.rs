//! Cross-chain manager handlers.
//!
//! - `createCrossChainTx` - commit an outbound message to the cross-state
//! - `processCrossChainTx` - verify an inbound message and route it

use common::{
    Address, CreateCrossChainTxParam, Decode, Encode, Header, MakeTxParam,
    ProcessCrossChainTxParam, ToMerkleValue, UnlockParam, BYTE_TRUE,
};
use cosmwasm_std::{Binary, Event, StdError};

use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::msg::{CREATE_CROSS_CHAIN_TX, UNLOCK};
use crate::service::NativeService;
use crate::state::{CROSS_CHAIN_ID, DONE_TX, REQUESTS};
use crate::vm::VmCall;

const REQUEST_KEY_PREFIX: &[u8] = b"request";

// ============================================================================
// Outbound
// ============================================================================

/// Allocate the next cross-chain id, persist the request and push it to the
/// block's cross-state accumulator.
pub fn execute_create_cross_chain_tx(
    native: &mut NativeService<'_>,
    params: CreateCrossChainTxParam,
) -> Result<Binary, ContractError> {
    let from_contract =
        native
            .calling_contract()
            .ok_or_else(|| ContractError::MissingCallingContract {
                method: CREATE_CROSS_CHAIN_TX.to_string(),
            })?;
    let manager = native.current_contract();

    // Advance the counter before anything else uses the id
    let cross_chain_id = CROSS_CHAIN_ID
        .may_load(native.storage(), manager.as_bytes())?
        .unwrap_or_default();
    let next_id = cross_chain_id
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("cross-chain id exhausted"))?;
    CROSS_CHAIN_ID.save(native.storage_mut(), manager.as_bytes(), &next_id)?;

    let tx_hash = native.tx_hash();
    let request = MakeTxParam {
        tx_hash: Binary::from(tx_hash.to_vec()),
        cross_chain_id: Binary::from(cross_chain_id.to_le_bytes().to_vec()),
        from_contract_address: Binary::from(from_contract.as_bytes()),
        to_chain_id: params.to_chain_id,
        to_contract_address: params.to_contract_address,
        method: params.method,
        args: params.args,
    };
    let serialized = Binary::from(request.to_bytes());

    let key = (manager.as_bytes(), request.to_chain_id, cross_chain_id);
    REQUESTS.save(native.storage_mut(), key, &serialized)?;
    native.push_cross_state(serialized);

    let height = native.height();
    native.notify(
        Event::new("make_from_proof")
            .add_attribute("tx_hash", bytes32_to_hex(&tx_hash))
            .add_attribute("to_chain_id", request.to_chain_id.to_string())
            .add_attribute("cross_chain_id", cross_chain_id.to_string())
            .add_attribute("height", height.to_string())
            .add_attribute("key", request_key_hex(request.to_chain_id, cross_chain_id))
            .add_attribute("from_contract", from_contract.to_hex())
            .add_attribute("args", hex::encode(request.args.as_slice())),
    );

    Ok(Binary::from(BYTE_TRUE))
}

/// Hex of `"request" ‖ to_chain_id ‖ cross_chain_id`, both ids as 8 LE bytes.
/// Relayers use it to locate the request on the source chain.
fn request_key_hex(to_chain_id: u64, cross_chain_id: u64) -> String {
    let mut key = REQUEST_KEY_PREFIX.to_vec();
    key.extend_from_slice(&to_chain_id.to_le_bytes());
    key.extend_from_slice(&cross_chain_id.to_le_bytes());
    hex::encode(key)
}

// ============================================================================
// Inbound
// ============================================================================

/// Verify a relayed message against a synchronized header and deliver it
/// exactly once.
pub fn execute_process_cross_chain_tx(
    native: &mut NativeService<'_>,
    params: ProcessCrossChainTxParam,
) -> Result<Binary, ContractError> {
    let runtime = native.runtime();
    let config = native.config();

    // 1. Header
    let header = load_or_sync_header(native, &params)?;

    // 2. Proof
    let proof = hex::decode(&params.proof).map_err(|e| {
        ContractError::InvalidProofEncoding {
            reason: e.to_string(),
        }
    })?;
    let leaf = runtime
        .merkle_prover()
        .prove(&proof, &header.cross_state_root)?;
    let merkle_value = ToMerkleValue::from_bytes(&leaf)?;
    let message = merkle_value.make_tx_param;

    // 3. Replay protection; the marker is written before dispatch
    let manager = native.current_contract();
    let done_key = (
        manager.as_bytes(),
        params.from_chain_id,
        message.cross_chain_id.as_slice(),
    );
    if DONE_TX.has(native.storage(), done_key) {
        return Err(ContractError::TxAlreadyDone {
            from_chain_id: params.from_chain_id,
            cross_chain_id: hex::encode(message.cross_chain_id.as_slice()),
        });
    }
    DONE_TX.save(native.storage_mut(), done_key, &true)?;

    native.notify(
        Event::new("verify_to_proof")
            .add_attribute("tx_hash", hex::encode(message.tx_hash.as_slice()))
            .add_attribute("raw_tx_hash", hex::encode(merkle_value.tx_hash.as_slice()))
            .add_attribute("from_chain_id", params.from_chain_id.to_string())
            .add_attribute("height", params.height.to_string())
            .add_attribute("to_contract", hex::encode(message.to_contract_address.as_slice())),
    );

    // 4. Destination
    if message.to_chain_id != config.local_chain_id {
        return Err(ContractError::WrongDestinationChain {
            to_chain_id: message.to_chain_id,
            local_chain_id: config.local_chain_id,
        });
    }

    // 5. Dispatch
    let to_contract = Address::from_slice(&message.to_contract_address)?;
    if to_contract == config.lock_proxy {
        if message.method != UNLOCK {
            return Err(ContractError::UnknownMethod {
                contract: "LockProxy".to_string(),
                method: message.method,
            });
        }
        let unlock = UnlockParam {
            args: message.args,
            from_contract_hash: message.from_contract_address,
            from_chain_id: merkle_value.from_chain_id,
        };
        native.native_call(to_contract, UNLOCK, Binary::from(unlock.to_bytes()))?;
    } else {
        let call = VmCall {
            contract: to_contract,
            method: message.method,
            args: message.args,
            from_contract: message.from_contract_address,
            from_chain_id: merkle_value.from_chain_id,
        };
        let value = native.vm_call(&call)?;
        match value.as_nonzero_integer() {
            Some(true) => {}
            Some(false) => {
                return Err(ContractError::VmResultFalse {
                    contract: call.contract,
                    method: call.method,
                })
            }
            None => {
                return Err(ContractError::VmCallFailed {
                    contract: call.contract,
                    method: call.method,
                    reason: format!("result {:?} is not an integer", value),
                })
            }
        }
    }

    Ok(Binary::from(BYTE_TRUE))
}

/// Header for `(from_chain_id, height)`, syncing the inline header first if
/// none is stored yet.
fn load_or_sync_header(
    native: &mut NativeService<'_>,
    params: &ProcessCrossChainTxParam,
) -> Result<Header, ContractError> {
    let header_sync = native.runtime().header_sync();
    let not_found = || ContractError::HeaderNotFound {
        chain_id: params.from_chain_id,
        height: params.height,
    };

    if let Some(header) =
        header_sync.get_header_by_height(native.storage(), params.from_chain_id, params.height)?
    {
        return Ok(header);
    }
    if params.header.is_empty() {
        return Err(not_found());
    }

    let header = Header::from_bytes(&params.header)?;
    header_sync.process_header(native.storage_mut(), &header, &params.header)?;
    header_sync
        .get_header_by_height(native.storage(), params.from_chain_id, params.height)?
        .ok_or_else(not_found)
}
