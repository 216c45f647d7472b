//! Transaction execution for the native bridge contracts.
//!
//! [`NativeRuntime`] bundles the contract registry, the node configuration
//! and the collaborators the contracts consult (header sync, Merkle prover,
//! VM invoker). Each [`InvokeTx`] runs against a copy-on-write overlay of the
//! ledger store: its writes are committed only if the whole call tree
//! succeeds.

use common::{Address, Encode, Sink};
use cosmwasm_std::{Binary, Event, Storage};
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::contract::register_contracts;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, keccak256};
use crate::header_sync::{HeaderSync, StoredHeaderSync};
use crate::merkle::{CrossStateAccumulator, KeccakMerkleProver, MerkleProver};
use crate::registry::ContractRegistry;
use crate::service::NativeService;
use crate::storage::OverlayStorage;
use crate::vm::{NoVm, VmInvoker};

/// A transaction invoking one native contract method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokeTx {
    pub nonce: u64,
    /// Accounts that signed the transaction.
    pub signers: Vec<Address>,
    pub contract: Address,
    pub method: String,
    pub input: Binary,
}

impl InvokeTx {
    pub fn new(contract: Address, method: impl Into<String>, input: impl Into<Binary>) -> Self {
        Self {
            nonce: 0,
            signers: Vec::new(),
            contract,
            method: method.into(),
            input: input.into(),
        }
    }

    pub fn signed_by(mut self, signer: Address) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.to_bytes())
    }
}

impl Encode for InvokeTx {
    fn encode(&self, sink: &mut Sink) {
        sink.write_u64(self.nonce);
        sink.write_var_uint(self.signers.len() as u64);
        for signer in &self.signers {
            sink.write_address(signer);
        }
        sink.write_address(&self.contract);
        sink.write_string(&self.method);
        sink.write_var_bytes(&self.input);
    }
}

/// A contract notification, attributed to the contract that raised it.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub contract: Address,
    pub event: Event,
}

/// Effects of a committed transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    pub tx_hash: [u8; 32],
    pub result: Binary,
    pub notifications: Vec<Notification>,
    /// Leaves to append to the block's cross-state accumulator.
    pub cross_states: Vec<Binary>,
}

impl ExecutionOutcome {
    /// First notification with the given event type.
    pub fn event(&self, ty: &str) -> Option<&Event> {
        self.notifications
            .iter()
            .map(|n| &n.event)
            .find(|e| e.ty == ty)
    }
}

/// Results of executing the transactions of one block.
#[derive(Debug, Default)]
pub struct BlockOutcome {
    pub height: u32,
    pub receipts: Vec<Result<ExecutionOutcome, ContractError>>,
    pub cross_states: CrossStateAccumulator,
}

pub struct NativeRuntime {
    config: BridgeConfig,
    registry: ContractRegistry,
    header_sync: Box<dyn HeaderSync>,
    merkle_prover: Box<dyn MerkleProver>,
    vm_invoker: Box<dyn VmInvoker>,
}

impl NativeRuntime {
    pub fn new(
        config: BridgeConfig,
        header_sync: Box<dyn HeaderSync>,
        merkle_prover: Box<dyn MerkleProver>,
        vm_invoker: Box<dyn VmInvoker>,
    ) -> Self {
        let mut registry = ContractRegistry::new();
        register_contracts(&mut registry, &config);
        Self {
            config,
            registry,
            header_sync,
            merkle_prover,
            vm_invoker,
        }
    }

    /// Runtime with the stored header sync, the keccak Merkle prover and no VM.
    /// No header validator is plugged in, so relayed headers are rejected and
    /// only headers already in storage can back a proof.
    pub fn with_defaults(config: BridgeConfig) -> Self {
        Self::new(
            config,
            Box::new(StoredHeaderSync::default()),
            Box::new(KeccakMerkleProver),
            Box::new(NoVm),
        )
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ContractRegistry {
        &mut self.registry
    }

    pub fn header_sync(&self) -> &dyn HeaderSync {
        self.header_sync.as_ref()
    }

    pub fn merkle_prover(&self) -> &dyn MerkleProver {
        self.merkle_prover.as_ref()
    }

    pub fn vm_invoker(&self) -> &dyn VmInvoker {
        self.vm_invoker.as_ref()
    }

    /// Execute one transaction. On error nothing is written to `store`.
    pub fn execute(
        &self,
        store: &mut dyn Storage,
        height: u32,
        tx: &InvokeTx,
    ) -> Result<ExecutionOutcome, ContractError> {
        let tx_hash = tx.hash();
        let mut overlay = OverlayStorage::new(&*store);

        let executed = {
            let mut native = NativeService::new(self, &mut overlay, tx, height);
            match native.invoke_current(&tx.method) {
                Ok(result) => Ok((result, native.into_outputs())),
                Err(err) => Err(err),
            }
        };

        let (result, (notifications, cross_states)) = match executed {
            Ok(outputs) => outputs,
            Err(err) => {
                warn!(
                    tx_hash = %bytes32_to_hex(&tx_hash),
                    contract = %tx.contract,
                    method = %tx.method,
                    error = %err,
                    "Transaction aborted, discarding state changes"
                );
                return Err(err);
            }
        };

        let changes = overlay.into_changes();
        let writes = changes.len();
        changes.apply(store);

        info!(
            tx_hash = %bytes32_to_hex(&tx_hash),
            contract = %tx.contract,
            method = %tx.method,
            writes,
            cross_states = cross_states.len(),
            "Transaction committed"
        );

        Ok(ExecutionOutcome {
            tx_hash,
            result,
            notifications,
            cross_states,
        })
    }

    /// Execute a block's transactions in order, accumulating the cross-state
    /// leaves of the ones that commit.
    pub fn execute_block(
        &self,
        store: &mut dyn Storage,
        height: u32,
        txs: &[InvokeTx],
    ) -> BlockOutcome {
        let mut block = BlockOutcome {
            height,
            ..Default::default()
        };
        for tx in txs {
            let receipt = self.execute(store, height, tx);
            if let Ok(outcome) = &receipt {
                block.cross_states.extend(outcome.cross_states.iter().cloned());
            }
            block.receipts.push(receipt);
        }
        block
    }
}
