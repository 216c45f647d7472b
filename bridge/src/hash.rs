//! Hash computation for the cross-state accumulator and transaction ids
//!
//! The accumulator uses domain-separated keccak256 so that a leaf can never
//! be confused with an interior node:
//!
//! - leaf: `keccak256(0x00 ‖ value)`
//! - node: `keccak256(0x01 ‖ left ‖ right)`

use tiny_keccak::{Hasher, Keccak};

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash of a Merkle leaf holding `value`.
pub fn leaf_hash(value: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(&[LEAF_PREFIX]);
    hasher.update(value);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash of an interior Merkle node.
pub fn node_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(&[NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert 32-byte hash to hex string (for event attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(hex: &str) -> Result<[u8; 32], &'static str> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }
    let mut result = [0u8; 32];
    hex::decode_to_slice(hex, &mut result).map_err(|_| "Invalid hex character")?;
    Ok(result)
}
