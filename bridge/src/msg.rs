//! Method names and decoded messages for the native contracts
//!
//! Native methods receive raw bytes. Each contract's entry point turns
//! `(method, input)` into one of the message enums below before dispatching,
//! so a malformed input fails before any state is touched.

use common::{
    Address, AllowanceParam, BindAssetParam, BindProxyParam, CodecError, CreateCrossChainTxParam,
    Decode, Encode, LockParam, ProcessCrossChainTxParam, Sink, Source, TransferFrom,
    TransferState, Transfers, UnlockParam,
};

use crate::error::ContractError;

// ============================================================================
// Method Names
// ============================================================================

pub const CREATE_CROSS_CHAIN_TX: &str = "createCrossChainTx";
pub const PROCESS_CROSS_CHAIN_TX: &str = "processCrossChainTx";

pub const LOCK: &str = "lock";
pub const UNLOCK: &str = "unlock";
pub const BIND_PROXY: &str = "bindProxy";
pub const BIND_ASSET: &str = "bindAsset";
pub const WITHDRAW_CNTM: &str = "withdrawcntm";
pub const GET_PROXY_HASH: &str = "getProxyHash";
pub const GET_ASSET_HASH: &str = "getAssetHash";
pub const GET_CROSSED_AMOUNT: &str = "getCrossedAmount";
pub const GET_CROSSED_LIMIT: &str = "getCrossedLimit";

pub const TRANSFER: &str = "transfer";
pub const TRANSFER_FROM: &str = "transferFrom";
pub const APPROVE: &str = "approve";
pub const ALLOWANCE: &str = "allowance";
pub const BALANCE_OF: &str = "balanceOf";
pub const NAME: &str = "name";
pub const SYMBOL: &str = "symbol";
pub const DECIMALS: &str = "decimals";
pub const TOTAL_SUPPLY: &str = "totalSupply";

fn unknown_method(contract: &str, method: &str) -> ContractError {
    ContractError::UnknownMethod {
        contract: contract.to_string(),
        method: method.to_string(),
    }
}

// ============================================================================
// Cross-Chain Manager
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManagerMsg {
    CreateCrossChainTx(CreateCrossChainTxParam),
    ProcessCrossChainTx(ProcessCrossChainTxParam),
}

impl ManagerMsg {
    pub fn parse(method: &str, input: &[u8]) -> Result<Self, ContractError> {
        Ok(match method {
            CREATE_CROSS_CHAIN_TX => {
                ManagerMsg::CreateCrossChainTx(CreateCrossChainTxParam::from_bytes(input)?)
            }
            PROCESS_CROSS_CHAIN_TX => {
                ManagerMsg::ProcessCrossChainTx(ProcessCrossChainTxParam::from_bytes(input)?)
            }
            _ => return Err(unknown_method("CrossChainManager", method)),
        })
    }
}

// ============================================================================
// Lock Proxy
// ============================================================================

/// Input of the per-asset getters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetChainQuery {
    pub source_asset_hash: Address,
    pub to_chain_id: u64,
}

impl Encode for AssetChainQuery {
    fn encode(&self, sink: &mut Sink) {
        sink.write_encoded_address(&self.source_asset_hash);
        sink.write_neo_u64(self.to_chain_id);
    }
}

impl Decode for AssetChainQuery {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(AssetChainQuery {
            source_asset_hash: source.read_encoded_address()?,
            to_chain_id: source.read_neo_u64()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockProxyMsg {
    Lock(LockParam),
    Unlock(UnlockParam),
    BindProxy(BindProxyParam),
    BindAsset(BindAssetParam),
    /// Sweep the gas token granted to the native token contract.
    WithdrawCntm { to_address: Address },
    GetProxyHash { to_chain_id: u64 },
    GetAssetHash(AssetChainQuery),
    GetCrossedAmount(AssetChainQuery),
    GetCrossedLimit(AssetChainQuery),
}

impl LockProxyMsg {
    pub fn parse(method: &str, input: &[u8]) -> Result<Self, ContractError> {
        let mut source = Source::new(input);
        Ok(match method {
            LOCK => LockProxyMsg::Lock(LockParam::decode(&mut source)?),
            UNLOCK => LockProxyMsg::Unlock(UnlockParam::decode(&mut source)?),
            BIND_PROXY => LockProxyMsg::BindProxy(BindProxyParam::decode(&mut source)?),
            BIND_ASSET => LockProxyMsg::BindAsset(BindAssetParam::decode(&mut source)?),
            WITHDRAW_CNTM => LockProxyMsg::WithdrawCntm {
                to_address: source.read_address()?,
            },
            GET_PROXY_HASH => LockProxyMsg::GetProxyHash {
                to_chain_id: source.read_neo_u64()?,
            },
            GET_ASSET_HASH => LockProxyMsg::GetAssetHash(AssetChainQuery::decode(&mut source)?),
            GET_CROSSED_AMOUNT => {
                LockProxyMsg::GetCrossedAmount(AssetChainQuery::decode(&mut source)?)
            }
            GET_CROSSED_LIMIT => {
                LockProxyMsg::GetCrossedLimit(AssetChainQuery::decode(&mut source)?)
            }
            _ => return Err(unknown_method("LockProxy", method)),
        })
    }
}

// ============================================================================
// Native Asset
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetMsg {
    Transfer(Transfers),
    TransferFrom(TransferFrom),
    Approve(TransferState),
    Allowance(AllowanceParam),
    BalanceOf { address: Address },
    Name,
    Symbol,
    Decimals,
    TotalSupply,
}

impl AssetMsg {
    pub fn parse(method: &str, input: &[u8]) -> Result<Self, ContractError> {
        let mut source = Source::new(input);
        Ok(match method {
            TRANSFER => AssetMsg::Transfer(Transfers::decode(&mut source)?),
            TRANSFER_FROM => AssetMsg::TransferFrom(TransferFrom::decode(&mut source)?),
            APPROVE => AssetMsg::Approve(TransferState::decode(&mut source)?),
            ALLOWANCE => AssetMsg::Allowance(AllowanceParam::decode(&mut source)?),
            BALANCE_OF => AssetMsg::BalanceOf {
                address: source.read_encoded_address()?,
            },
            NAME => AssetMsg::Name,
            SYMBOL => AssetMsg::Symbol,
            DECIMALS => AssetMsg::Decimals,
            TOTAL_SUPPLY => AssetMsg::TotalSupply,
            _ => return Err(unknown_method("NativeAsset", method)),
        })
    }
}
