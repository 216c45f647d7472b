//! Common - Wire Types Shared by the Native Bridge Contracts
//!
//! This package provides the byte-exact codec, 20-byte addresses, the
//! cross-chain message envelopes and the asset parameters exchanged between
//! the cross-chain manager, the lock proxy and the native asset contracts.

pub mod address;
pub mod asset;
pub mod codec;
pub mod envelope;

pub use address::Address;
pub use asset::{
    AllowanceParam, Args, BindAssetParam, BindProxyParam, LockParam, TransferFrom, TransferState,
    Transfers, UnlockParam,
};
pub use codec::{CodecError, Decode, Encode, Sink, Source};
pub use envelope::{
    CreateCrossChainTxParam, Header, MakeTxParam, ProcessCrossChainTxParam, ToMerkleValue,
};

/// Success marker returned by native methods.
pub const BYTE_TRUE: &[u8] = &[1];

/// Failure marker returned by native methods that decline without error.
pub const BYTE_FALSE: &[u8] = &[0];
