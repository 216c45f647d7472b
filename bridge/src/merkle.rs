//! Cross-state Merkle commitments
//!
//! Outbound messages are appended to a per-block [`CrossStateAccumulator`];
//! the block's cross-state root commits to all of them. The destination
//! chain checks an audit path against that root with a [`MerkleProver`].
//!
//! # Proof Layout
//! ```text
//! var-bytes leaf value
//! repeated: pos (1 byte) ‖ sibling hash (32 bytes)
//! ```
//! `pos == 0` places the sibling on the left and `pos == 1` on the right;
//! other values are rejected. Path entries go from the leaf up to the root.

use common::{Sink, Source};
use cosmwasm_std::Binary;

use crate::error::ContractError;
use crate::hash::{keccak256, leaf_hash, node_hash};

const SIBLING_LEFT: u8 = 0;
const SIBLING_RIGHT: u8 = 1;

/// Verifies inclusion proofs against a cross-state root.
pub trait MerkleProver {
    /// Returns the proven leaf value when `proof` hashes up to `root`.
    fn prove(&self, proof: &[u8], root: &[u8; 32]) -> Result<Vec<u8>, ContractError>;
}

/// Prover for keccak-based, domain-separated audit paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakMerkleProver;

impl MerkleProver for KeccakMerkleProver {
    fn prove(&self, proof: &[u8], root: &[u8; 32]) -> Result<Vec<u8>, ContractError> {
        let malformed = |e: common::CodecError| ContractError::InvalidProofEncoding {
            reason: e.to_string(),
        };

        let mut source = Source::new(proof);
        let value = source.read_var_bytes().map_err(malformed)?;
        let mut hash = leaf_hash(value);

        while !source.is_empty() {
            let pos = source.read_u8().map_err(malformed)?;
            let sibling = source.read_hash().map_err(malformed)?;
            hash = match pos {
                SIBLING_LEFT => node_hash(&sibling, &hash),
                SIBLING_RIGHT => node_hash(&hash, &sibling),
                other => {
                    return Err(ContractError::InvalidProofEncoding {
                        reason: format!("invalid path position {:#04x}", other),
                    })
                }
            };
        }

        if hash != *root {
            return Err(ContractError::InvalidProof);
        }
        Ok(value.to_vec())
    }
}

/// Append-only leaf list for one block.
///
/// The tree splits `n` leaves at the largest power of two below `n`, so the
/// root of a prefix never changes shape when leaves are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossStateAccumulator {
    leaves: Vec<Binary>,
}

impl CrossStateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Binary>) {
        self.leaves.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaves(&self) -> &[Binary] {
        &self.leaves
    }

    /// Root over all leaves; the hash of the empty string for no leaves.
    pub fn root(&self) -> [u8; 32] {
        if self.leaves.is_empty() {
            return keccak256(&[]);
        }
        subtree_root(&self.leaves)
    }

    /// Serialized audit path for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Option<Vec<u8>> {
        let value = self.leaves.get(index)?;
        let mut path = Vec::new();
        audit_path(index, &self.leaves, &mut path);

        let mut sink = Sink::new();
        sink.write_var_bytes(value);
        for (pos, sibling) in path {
            sink.write_u8(pos);
            sink.write_hash(&sibling);
        }
        Some(sink.into_bytes())
    }
}

impl Extend<Binary> for CrossStateAccumulator {
    fn extend<T: IntoIterator<Item = Binary>>(&mut self, iter: T) {
        self.leaves.extend(iter);
    }
}

fn split_point(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

fn subtree_root(leaves: &[Binary]) -> [u8; 32] {
    if leaves.len() == 1 {
        return leaf_hash(&leaves[0]);
    }
    let k = split_point(leaves.len());
    node_hash(&subtree_root(&leaves[..k]), &subtree_root(&leaves[k..]))
}

/// Leaf-first list of `(position, sibling)` pairs.
fn audit_path(index: usize, leaves: &[Binary], path: &mut Vec<(u8, [u8; 32])>) {
    if leaves.len() <= 1 {
        return;
    }
    let k = split_point(leaves.len());
    if index < k {
        audit_path(index, &leaves[..k], path);
        path.push((SIBLING_RIGHT, subtree_root(&leaves[k..])));
    } else {
        audit_path(index - k, &leaves[k..], path);
        path.push((SIBLING_LEFT, subtree_root(&leaves[..k])));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator(n: usize) -> CrossStateAccumulator {
        let mut acc = CrossStateAccumulator::new();
        for i in 0..n {
            acc.push(format!("leaf-{}", i).into_bytes());
        }
        acc
    }

    #[test]
    fn test_single_leaf_root_is_leaf_hash() {
        let acc = accumulator(1);
        assert_eq!(acc.root(), leaf_hash(b"leaf-0"));
        let proof = acc.proof(0).unwrap();
        assert_eq!(
            KeccakMerkleProver.prove(&proof, &acc.root()).unwrap(),
            b"leaf-0".to_vec()
        );
    }

    #[test]
    fn test_two_leaf_root() {
        let acc = accumulator(2);
        assert_eq!(
            acc.root(),
            node_hash(&leaf_hash(b"leaf-0"), &leaf_hash(b"leaf-1"))
        );
    }

    #[test]
    fn test_every_leaf_proves_against_root() {
        for n in [1usize, 2, 3, 5, 8, 13] {
            let acc = accumulator(n);
            let root = acc.root();
            for i in 0..n {
                let proof = acc.proof(i).unwrap();
                let value = KeccakMerkleProver.prove(&proof, &root).unwrap();
                assert_eq!(value, format!("leaf-{}", i).into_bytes());
            }
            assert!(acc.proof(n).is_none());
        }
    }

    #[test]
    fn test_wrong_root_rejected() {
        let acc = accumulator(4);
        let proof = acc.proof(2).unwrap();
        assert_eq!(
            KeccakMerkleProver.prove(&proof, &[0u8; 32]).unwrap_err(),
            ContractError::InvalidProof
        );
    }

    #[test]
    fn test_tampered_value_rejected() {
        let acc = accumulator(3);
        let mut proof = acc.proof(1).unwrap();
        // first value byte follows the one-byte length prefix
        proof[1] ^= 0xFF;
        assert_eq!(
            KeccakMerkleProver.prove(&proof, &acc.root()).unwrap_err(),
            ContractError::InvalidProof
        );
    }

    #[test]
    fn test_malformed_path_rejected() {
        let acc = accumulator(2);
        let mut proof = acc.proof(0).unwrap();
        proof.truncate(proof.len() - 1);
        assert!(matches!(
            KeccakMerkleProver.prove(&proof, &acc.root()),
            Err(ContractError::InvalidProofEncoding { .. })
        ));

        let mut proof = acc.proof(0).unwrap();
        let pos_index = proof.len() - 33;
        proof[pos_index] = 7;
        assert!(matches!(
            KeccakMerkleProver.prove(&proof, &acc.root()),
            Err(ContractError::InvalidProofEncoding { .. })
        ));
    }

    #[test]
    fn test_prefix_root_stable_under_power_of_two() {
        let four = accumulator(4).root();
        let five = accumulator(5);
        assert_eq!(
            five.root(),
            node_hash(&four, &leaf_hash(b"leaf-4"))
        );
    }
}
