//! Error types for the native bridge contracts
//!
//! Every variant aborts the enclosing transaction; no partial effects survive.

use common::{Address, CodecError};
use cosmwasm_std::{StdError, Uint256};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Deserialization failed: {0}")]
    Codec(#[from] CodecError),

    // ========================================================================
    // Dispatch Errors
    // ========================================================================

    #[error("No native contract registered at {address}")]
    UnknownContract { address: Address },

    #[error("Contract {contract} has no method {method}")]
    UnknownMethod { contract: String, method: String },

    #[error("Method {method} must be invoked by a contract")]
    MissingCallingContract { method: String },

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: missing witness of {address}")]
    MissingWitness { address: Address },

    #[error("Unauthorized: only the operator can perform this action")]
    NotOperator,

    #[error("Unauthorized: only the cross-chain manager can call unlock")]
    NotCrossChainManager,

    #[error("Operator role is not configured")]
    OperatorNotSet,

    // ========================================================================
    // Binding Errors
    // ========================================================================

    #[error("No proxy bound for chain {chain_id}")]
    ProxyNotBound { chain_id: u64 },

    #[error("No target asset bound for {asset} on chain {chain_id}")]
    AssetNotBound { asset: Address, chain_id: u64 },

    #[error("Source proxy {got} does not match the proxy bound for chain {chain_id}")]
    ProxyMismatch { chain_id: u64, got: String },

    #[error("Asset not supported: {asset}")]
    UnsupportedAsset { asset: String },

    #[error("New limit {new_limit} must be greater than stored limit {stored_limit}")]
    LimitNotIncreasing {
        new_limit: Uint256,
        stored_limit: Uint256,
    },

    // ========================================================================
    // Invariant Errors
    // ========================================================================

    #[error("Crossed amount overflow")]
    CrossedAmountOverflow,

    #[error("Crossed amount {crossed} would exceed limit {limit}")]
    LimitExceeded { crossed: Uint256, limit: Uint256 },

    #[error("Crossed amount underflow: {crossed} crossed, {requested} requested")]
    CrossedAmountUnderflow { crossed: Uint256, requested: Uint256 },

    #[error("Insufficient balance: {balance} available, {requested} requested")]
    InsufficientBalance { balance: u64, requested: u64 },

    #[error("Insufficient allowance: {allowance} approved, {requested} requested")]
    InsufficientAllowance { allowance: u64, requested: u64 },

    #[error("Balance overflow")]
    BalanceOverflow,

    // ========================================================================
    // Relay Errors
    // ========================================================================

    #[error("Cross-chain tx already processed: chain {from_chain_id}, id {cross_chain_id}")]
    TxAlreadyDone {
        from_chain_id: u64,
        cross_chain_id: String,
    },

    #[error("Header of chain {chain_id} at height {height} not found")]
    HeaderNotFound { chain_id: u64, height: u32 },

    #[error("Header sync rejected header: {reason}")]
    HeaderSync { reason: String },

    #[error("Header of chain {chain_id} at height {height} failed validation")]
    UnverifiedHeader { chain_id: u64, height: u32 },

    #[error("Invalid proof encoding: {reason}")]
    InvalidProofEncoding { reason: String },

    #[error("Merkle proof does not match the cross-state root")]
    InvalidProof,

    #[error("Message is for chain {to_chain_id}, local chain is {local_chain_id}")]
    WrongDestinationChain {
        to_chain_id: u64,
        local_chain_id: u64,
    },

    // ========================================================================
    // Downstream Call Errors
    // ========================================================================

    #[error("VM call to {contract}.{method} failed: {reason}")]
    VmCallFailed {
        contract: Address,
        method: String,
        reason: String,
    },

    #[error("VM call to {contract}.{method} returned false")]
    VmResultFalse { contract: Address, method: String },

    #[error("Nested call to {contract}.{method} returned false")]
    NativeCallFalse { contract: String, method: String },
}
