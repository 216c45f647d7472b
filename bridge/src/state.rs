//! State definitions for the cross-chain manager and the lock proxy
//!
//! Every key starts with the owning contract's address, so several
//! deployments can share one ledger store without colliding.

use cosmwasm_std::{Binary, Uint256};
use cw_storage_plus::Map;

// ============================================================================
// Cross-Chain Manager
// ============================================================================

/// manager -> next outbound cross-chain id
pub const CROSS_CHAIN_ID: Map<&[u8], u64> = Map::new("crossChainID");

/// (manager, to_chain_id, cross_chain_id) -> serialized MakeTxParam
pub const REQUESTS: Map<(&[u8], u64, u64), Binary> = Map::new("request");

/// (manager, from_chain_id, cross_chain_id bytes) -> processed marker.
/// Entries are never removed.
pub const DONE_TX: Map<(&[u8], u64, &[u8]), bool> = Map::new("doneTx");

// ============================================================================
// Lock Proxy
// ============================================================================

/// (proxy, to_chain_id) -> lock proxy hash on the remote chain
pub const PROXY_HASHES: Map<(&[u8], u64), Binary> = Map::new("bindProxy");

/// (proxy, source_asset, to_chain_id) -> asset hash on the remote chain
pub const ASSET_HASHES: Map<(&[u8], &[u8], u64), Binary> = Map::new("bindAssetTarget");

/// (proxy, source_asset, to_chain_id) -> maximum crossed amount
pub const CROSSED_LIMITS: Map<(&[u8], &[u8], u64), Uint256> = Map::new("assetCrossLimit");

/// (proxy, source_asset, chain_id) -> amount currently bridged out
pub const CROSSED_AMOUNTS: Map<(&[u8], &[u8], u64), Uint256> = Map::new("assetCrossedAmount");
