//! Cross-Chain Bridge - Native Contracts for Lock/Unlock Asset Bridging
//!
//! This crate implements the native contracts a chain node runs to move
//! assets to and from other chains through a relay chain.
//!
//! # Outgoing Flow (Lock)
//! 1. User calls `lock` on the lock proxy
//! 2. The proxy takes custody of the asset and bumps the crossed amount
//! 3. The proxy calls `createCrossChainTx` on the cross-chain manager
//! 4. The manager stores the request and appends it to the block's
//!    cross-state root for relayers to prove on the relay chain
//!
//! # Incoming Flow (Unlock)
//! 1. Relayer calls `processCrossChainTx` with a relay-chain header and proof
//! 2. The manager verifies the proof against the header's cross-state root
//! 3. Replays are rejected by the done-transaction set
//! 4. The message is routed to the lock proxy's `unlock` or to a VM contract
//!
//! # Security
//! - Operator-gated binding of remote proxies and assets
//! - Per (asset, chain) crossing limits that only grow
//! - Caller-or-signer witness checks on every value transfer
//! - Every transaction runs on a storage overlay discarded on failure

pub mod asset;
pub mod config;
pub mod contract;
pub mod error;
mod execute;
pub mod governance;
pub mod hash;
pub mod header_sync;
pub mod merkle;
pub mod msg;
mod query;
pub mod registry;
pub mod runtime;
pub mod service;
pub mod state;
pub mod storage;
pub mod vm;

pub use crate::config::BridgeConfig;
pub use crate::error::ContractError;
pub use crate::hash::keccak256;
pub use crate::header_sync::{
    HeaderSync, HeaderValidator, RejectUnverifiedHeaders, StoredHeaderSync,
};
pub use crate::merkle::{CrossStateAccumulator, KeccakMerkleProver, MerkleProver};
pub use crate::registry::ContractRegistry;
pub use crate::runtime::{BlockOutcome, ExecutionOutcome, InvokeTx, NativeRuntime, Notification};
pub use crate::service::NativeService;
pub use crate::vm::{NoVm, VmCall, VmInvoker, VmValue};
