//! Asset bridging parameters.
//!
//! Lock Proxy method inputs, the `Args` payload carried inside a cross-chain
//! message, and the native asset contract's transfer parameters.

use cosmwasm_std::{Binary, Uint256};

use crate::address::Address;
use crate::codec::{CodecError, Decode, Encode, Sink, Source};

// ============================================================================
// Lock Proxy parameters
// ============================================================================

/// Input of `lock`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockParam {
    pub source_asset_hash: Address,
    pub to_chain_id: u64,
    pub from_address: Address,
    /// Recipient on the destination chain; any length.
    pub to_address: Binary,
    pub value: u64,
}

impl Encode for LockParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.source_asset_hash);
        sink.write_neo_u64(self.to_chain_id);
        sink.write_encoded_address(&self.from_address);
        sink.write_var_bytes(&self.to_address);
        sink.write_neo_u64(self.value);
    }
}

impl Decode for LockParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(LockParam {
            source_asset_hash: source.read_encoded_address()?,
            to_chain_id: source.read_neo_u64()?,
            from_address: source.read_encoded_address()?,
            to_address: source.read_var_bytes()?.into(),
            value: source.read_neo_u64()?,
        })
    }
}

/// Input of `unlock`, assembled by the cross-chain manager.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UnlockParam {
    /// Serialized [`Args`].
    pub args: Binary,
    pub from_contract_hash: Binary,
    pub from_chain_id: u64,
}

impl Encode for UnlockParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_var_bytes(&self.args);
        sink.write_var_bytes(&self.from_contract_hash);
        sink.write_neo_u64(self.from_chain_id);
    }
}

impl Decode for UnlockParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(UnlockParam {
            args: source.read_var_bytes()?.into(),
            from_contract_hash: source.read_var_bytes()?.into(),
            from_chain_id: source.read_neo_u64()?,
        })
    }
}

/// Payload of an `unlock` message travelling between lock proxies.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Args {
    pub target_asset_hash: Binary,
    pub to_address: Binary,
    pub value: u64,
}

impl Encode for Args {
    fn encode(&self, sink: &mut Sink) {
        sink.write_var_bytes(&self.target_asset_hash);
        sink.write_var_bytes(&self.to_address);
        sink.write_u64(self.value);
    }
}

impl Decode for Args {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(Args {
            target_asset_hash: source.read_var_bytes()?.into(),
            to_address: source.read_var_bytes()?.into(),
            value: source.read_u64()?,
        })
    }
}

/// Input of `bindProxy`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BindProxyParam {
    pub target_chain_id: u64,
    pub target_hash: Binary,
}

impl Encode for BindProxyParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_neo_u64(self.target_chain_id);
        sink.write_var_bytes(&self.target_hash);
    }
}

impl Decode for BindProxyParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(BindProxyParam {
            target_chain_id: source.read_neo_u64()?,
            target_hash: source.read_var_bytes()?.into(),
        })
    }
}

/// Input of `bindAsset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindAssetParam {
    pub source_asset_hash: Address,
    pub target_chain_id: u64,
    pub target_asset_hash: Binary,
    pub limit: Uint256,
    /// The asset originates on the target chain; raising the limit credits
    /// the crossed amount as if the difference had already been locked.
    pub is_target_chain_asset: bool,
}

impl Encode for BindAssetParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.source_asset_hash);
        sink.write_neo_u64(self.target_chain_id);
        sink.write_var_bytes(&self.target_asset_hash);
        sink.write_neo_uint256(self.limit);
        sink.write_bool(self.is_target_chain_asset);
    }
}

impl Decode for BindAssetParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(BindAssetParam {
            source_asset_hash: source.read_encoded_address()?,
            target_chain_id: source.read_neo_u64()?,
            target_asset_hash: source.read_var_bytes()?.into(),
            limit: source.read_neo_uint256()?,
            is_target_chain_asset: source.read_bool()?,
        })
    }
}

// ============================================================================
// Native asset parameters
// ============================================================================

/// One balance movement; also the input of `approve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferState {
    pub from: Address,
    pub to: Address,
    pub value: u64,
}

impl Encode for TransferState {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.from);
        sink.write_encoded_address(&self.to);
        sink.write_neo_u64(self.value);
    }
}

impl Decode for TransferState {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(TransferState {
            from: source.read_encoded_address()?,
            to: source.read_encoded_address()?,
            value: source.read_neo_u64()?,
        })
    }
}

/// Input of `transfer`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Transfers {
    pub states: Vec<TransferState>,
}

impl Transfers {
    pub fn single(from: Address, to: Address, value: u64) -> Self {
        Transfers {
            states: vec![TransferState { from, to, value }],
        }
    }
}

impl Encode for Transfers {
    fn encode(&self, sink: &mut Sink) {
        sink.write_var_uint(self.states.len() as u64);
        for state in &self.states {
            state.encode(sink);
        }
    }
}

impl Decode for Transfers {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        let count = source.read_var_uint()?;
        let mut states = Vec::new();
        for _ in 0..count {
            states.push(TransferState::decode(source)?);
        }
        Ok(Transfers { states })
    }
}

/// Input of `transferFrom`: `sender` spends `from`'s allowance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferFrom {
    pub sender: Address,
    pub from: Address,
    pub to: Address,
    pub value: u64,
}

impl Encode for TransferFrom {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.sender);
        sink.write_encoded_address(&self.from);
        sink.write_encoded_address(&self.to);
        sink.write_neo_u64(self.value);
    }
}

impl Decode for TransferFrom {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(TransferFrom {
            sender: source.read_encoded_address()?,
            from: source.read_encoded_address()?,
            to: source.read_encoded_address()?,
            value: source.read_neo_u64()?,
        })
    }
}

/// Input of `allowance`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowanceParam {
    pub from: Address,
    pub to: Address,
}

impl Encode for AllowanceParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.from);
        sink.write_encoded_address(&self.to);
    }
}

impl Decode for AllowanceParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(AllowanceParam {
            from: source.read_encoded_address()?,
            to: source.read_encoded_address()?,
        })
    }
}
