//! Shared setup for the native bridge integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use common::codec::{neo_bytes_to_u64, neo_bytes_to_uint256};
use common::{
    Address, Args, BindAssetParam, BindProxyParam, Encode, Header, LockParam, MakeTxParam,
    ProcessCrossChainTxParam, Sink, ToMerkleValue,
};
use cosmwasm_std::testing::MockStorage;
use cosmwasm_std::{Binary, Uint256};
use tracing_subscriber::EnvFilter;

use cross_chain_bridge::asset::{balance_of, init_allowance, init_balance};
use cross_chain_bridge::governance::set_operator;
use cross_chain_bridge::msg::{
    AssetChainQuery, BIND_ASSET, BIND_PROXY, GET_CROSSED_AMOUNT, GET_CROSSED_LIMIT, LOCK,
    PROCESS_CROSS_CHAIN_TX, UNLOCK,
};
use cross_chain_bridge::{
    BridgeConfig, ContractError, CrossStateAccumulator, ExecutionOutcome, HeaderValidator,
    InvokeTx, KeccakMerkleProver, NativeRuntime, NativeService, NoVm, StoredHeaderSync, VmCall,
    VmInvoker, VmValue,
};

/// Relay chain whose headers carry the cross-state roots.
pub const RELAY_CHAIN_ID: u64 = 0;
/// Remote chain the lock proxy bridges with.
pub const REMOTE_CHAIN_ID: u64 = 2;

/// Bookkeeper named by every header the test relay chain produces.
pub const RELAY_BOOKKEEPER: Address = Address([0xBB; 20]);

pub const REMOTE_PROXY: [u8; 20] = [0xE1; 20];
pub const REMOTE_ASSET: [u8; 20] = [0xE2; 20];

pub const USER_FUNDS: u64 = 1_000_000;
pub const INITIAL_LIMIT: u64 = 500_000;

pub struct TestEnv {
    pub runtime: NativeRuntime,
    pub storage: MockStorage,
    pub operator: Address,
    pub user: Address,
    pub height: u32,
    pub relay_height: u32,
    relay_nonce: u64,
}

/// Calls recorded by [`RecordingVm`].
pub type VmCalls = Rc<RefCell<Vec<VmCall>>>;

/// VM stand-in that records every routed call and answers with a fixed value.
pub struct RecordingVm {
    pub calls: VmCalls,
    pub result: VmValue,
}

impl VmInvoker for RecordingVm {
    fn invoke(
        &self,
        _native: &mut NativeService<'_>,
        call: &VmCall,
    ) -> Result<VmValue, ContractError> {
        self.calls.borrow_mut().push(call.clone());
        Ok(self.result.clone())
    }
}

/// Light-client stand-in: a relayed header is valid when it keeps the
/// bookkeeper of the trusted genesis header.
pub struct GenesisBookkeeper;

impl HeaderValidator for GenesisBookkeeper {
    fn validate(
        &self,
        _storage: &dyn cosmwasm_std::Storage,
        trusted: &Header,
        header: &Header,
        _raw: &[u8],
    ) -> Result<(), ContractError> {
        if header.next_bookkeeper != trusted.next_bookkeeper {
            return Err(ContractError::UnverifiedHeader {
                chain_id: header.chain_id,
                height: header.height,
            });
        }
        Ok(())
    }
}

fn header_sync() -> Box<StoredHeaderSync> {
    Box::new(StoredHeaderSync::new(Box::new(GenesisBookkeeper)))
}

/// Default contracts with relayed headers checked by [`GenesisBookkeeper`].
pub fn test_runtime(config: BridgeConfig) -> NativeRuntime {
    NativeRuntime::new(
        config,
        header_sync(),
        Box::new(KeccakMerkleProver),
        Box::new(NoVm),
    )
}

pub fn runtime_with_vm(config: BridgeConfig, result: VmValue) -> (NativeRuntime, VmCalls) {
    let calls = VmCalls::default();
    let runtime = NativeRuntime::new(
        config,
        header_sync(),
        Box::new(KeccakMerkleProver),
        Box::new(RecordingVm {
            calls: calls.clone(),
            result,
        }),
    );
    (runtime, calls)
}

/// Runtime with default contracts, an operator, a funded user, a genesis
/// relay header, and the remote proxy and native token bound.
pub fn setup() -> TestEnv {
    setup_with(test_runtime(BridgeConfig::default()))
}

pub fn setup_with(runtime: NativeRuntime) -> TestEnv {
    let mut env = bare_env(runtime);

    env.bind_proxy(REMOTE_CHAIN_ID, &REMOTE_PROXY).unwrap();
    let native_token = env.config().native_token;
    env.bind_asset(
        native_token,
        REMOTE_CHAIN_ID,
        &REMOTE_ASSET,
        INITIAL_LIMIT,
        false,
    )
    .unwrap();
    env
}

/// Route runtime logs to the test writer; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Genesis state only: no bindings.
pub fn bare_env(runtime: NativeRuntime) -> TestEnv {
    init_tracing();

    let mut storage = MockStorage::new();
    let operator = Address([0x0E; 20]);
    let user = Address([0xA1; 20]);
    let config = runtime.config().clone();

    set_operator(&mut storage, &config.params_contract, &operator).unwrap();
    init_balance(&mut storage, &config.native_token, &user, USER_FUNDS).unwrap();
    init_balance(&mut storage, &config.gas_token, &user, USER_FUNDS).unwrap();

    let genesis = Header {
        chain_id: RELAY_CHAIN_ID,
        height: 0,
        next_bookkeeper: RELAY_BOOKKEEPER,
        ..Default::default()
    };
    StoredHeaderSync::sync_genesis_header(&mut storage, &genesis.to_bytes()).unwrap();

    TestEnv {
        runtime,
        storage,
        operator,
        user,
        height: 0,
        relay_height: 0,
        relay_nonce: 0,
    }
}

/// Grant the lock proxy a gas-token allowance on the native token's holdings.
pub fn fund_gas_allowance(env: &mut TestEnv, amount: u64) {
    let config = env.config().clone();
    init_balance(&mut env.storage, &config.gas_token, &config.native_token, amount).unwrap();
    init_allowance(
        &mut env.storage,
        &config.gas_token,
        &config.native_token,
        &config.lock_proxy,
        amount,
    )
    .unwrap();
}

impl TestEnv {
    pub fn config(&self) -> &BridgeConfig {
        self.runtime.config()
    }

    pub fn execute(&mut self, tx: InvokeTx) -> Result<ExecutionOutcome, ContractError> {
        self.height += 1;
        self.runtime.execute(&mut self.storage, self.height, &tx)
    }

    pub fn proxy_tx(&self, method: &str, input: Vec<u8>) -> InvokeTx {
        InvokeTx::new(self.config().lock_proxy, method, input)
    }

    pub fn bind_proxy(
        &mut self,
        chain_id: u64,
        target: &[u8],
    ) -> Result<ExecutionOutcome, ContractError> {
        let params = BindProxyParam {
            target_chain_id: chain_id,
            target_hash: Binary::from(target),
        };
        let tx = self
            .proxy_tx(BIND_PROXY, params.to_bytes())
            .signed_by(self.operator);
        self.execute(tx)
    }

    pub fn bind_asset(
        &mut self,
        asset: Address,
        chain_id: u64,
        target: &[u8],
        limit: u64,
        is_target_chain_asset: bool,
    ) -> Result<ExecutionOutcome, ContractError> {
        let params = BindAssetParam {
            source_asset_hash: asset,
            target_chain_id: chain_id,
            target_asset_hash: Binary::from(target),
            limit: Uint256::from(limit),
            is_target_chain_asset,
        };
        let tx = self
            .proxy_tx(BIND_ASSET, params.to_bytes())
            .signed_by(self.operator);
        self.execute(tx)
    }

    pub fn lock(
        &mut self,
        asset: Address,
        to_chain_id: u64,
        value: u64,
    ) -> Result<ExecutionOutcome, ContractError> {
        let params = LockParam {
            source_asset_hash: asset,
            to_chain_id,
            from_address: self.user,
            to_address: Binary::from(vec![0xCD; 20]),
            value,
        };
        let tx = self
            .proxy_tx(LOCK, params.to_bytes())
            .signed_by(self.user);
        self.execute(tx)
    }

    pub fn balance(&self, asset: &Address, holder: &Address) -> u64 {
        balance_of(&self.storage, asset, holder).unwrap()
    }

    pub fn crossed_amount(&mut self, asset: Address, chain_id: u64) -> Uint256 {
        self.asset_query(GET_CROSSED_AMOUNT, asset, chain_id)
    }

    pub fn crossed_limit(&mut self, asset: Address, chain_id: u64) -> Uint256 {
        self.asset_query(GET_CROSSED_LIMIT, asset, chain_id)
    }

    fn asset_query(&mut self, method: &str, asset: Address, chain_id: u64) -> Uint256 {
        let query = AssetChainQuery {
            source_asset_hash: asset,
            to_chain_id: chain_id,
        };
        let outcome = self.execute(self.proxy_tx(method, query.to_bytes())).unwrap();
        neo_bytes_to_uint256(&outcome.result).unwrap()
    }

    pub fn query_u64(&mut self, contract: Address, method: &str, input: Vec<u8>) -> u64 {
        let outcome = self.execute(InvokeTx::new(contract, method, input)).unwrap();
        neo_bytes_to_u64(&outcome.result).unwrap()
    }

    /// Inbound `unlock` message from the remote proxy.
    pub fn unlock_message(&self, asset: Address, to: Address, value: u64) -> MakeTxParam {
        let args = Args {
            target_asset_hash: Binary::from(asset.as_bytes()),
            to_address: Binary::from(to.as_bytes()),
            value,
        };
        MakeTxParam {
            tx_hash: Binary::from(vec![0x5A; 32]),
            cross_chain_id: Binary::from(self.relay_nonce.to_le_bytes().to_vec()),
            from_contract_address: Binary::from(REMOTE_PROXY.to_vec()),
            to_chain_id: self.config().local_chain_id,
            to_contract_address: Binary::from(self.config().lock_proxy.as_bytes()),
            method: UNLOCK.to_string(),
            args: Binary::from(args.to_bytes()),
        }
    }

    /// Commit `message` to a fresh relay header and return the
    /// `processCrossChainTx` input carrying that header inline.
    pub fn relay(&mut self, message: MakeTxParam, from_chain_id: u64) -> ProcessCrossChainTxParam {
        self.relay_nonce += 1;
        self.relay_height += 1;

        let value = ToMerkleValue {
            tx_hash: Binary::from(self.relay_nonce.to_be_bytes().repeat(4)),
            from_chain_id,
            make_tx_param: message,
        };
        let mut accumulator = CrossStateAccumulator::new();
        accumulator.push(value.to_bytes());
        let proof = accumulator.proof(0).unwrap();

        let header = Header {
            chain_id: RELAY_CHAIN_ID,
            height: self.relay_height,
            cross_state_root: accumulator.root(),
            next_bookkeeper: RELAY_BOOKKEEPER,
            ..Default::default()
        };

        ProcessCrossChainTxParam {
            from_chain_id: RELAY_CHAIN_ID,
            height: self.relay_height,
            header: Binary::from(header.to_bytes()),
            proof: hex::encode(proof),
        }
    }

    /// Submit a relayed message as an unsigned relayer transaction.
    pub fn process(
        &mut self,
        params: &ProcessCrossChainTxParam,
    ) -> Result<ExecutionOutcome, ContractError> {
        let tx = InvokeTx::new(
            self.config().cross_chain_manager,
            PROCESS_CROSS_CHAIN_TX,
            params.to_bytes(),
        )
        .signed_by(Address([0x7E; 20]));
        self.execute(tx)
    }
}

/// Chain id argument of the single-integer getters: var-bytes wrapped
/// Neo integer bytes.
pub fn neo_u64(value: u64) -> Vec<u8> {
    let mut sink = Sink::new();
    sink.write_neo_u64(value);
    sink.into_bytes()
}
