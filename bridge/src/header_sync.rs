//! Relay-chain header synchronization
//!
//! The cross-chain manager only needs two things from header sync: look up
//! a header by `(chain, height)` and accept a new header supplied inline by
//! a relayer. Header validation (signatures, bookkeeper rotation) belongs to
//! the light client plugged in as a [`HeaderValidator`]. Without one, every
//! relayed header is rejected and only the trusted genesis header is known.

use common::{Decode, Encode, Header};
use cosmwasm_std::{Binary, Storage};
use cw_storage_plus::Map;
use tracing::debug;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, keccak256};

pub trait HeaderSync {
    fn get_header_by_height(
        &self,
        storage: &dyn Storage,
        chain_id: u64,
        height: u32,
    ) -> Result<Option<Header>, ContractError>;

    /// Accept `header` (serialized as `raw`) or fail.
    fn process_header(
        &self,
        storage: &mut dyn Storage,
        header: &Header,
        raw: &[u8],
    ) -> Result<(), ContractError>;
}

/// Consensus check for a relayed header, run before it is stored.
pub trait HeaderValidator {
    /// `trusted` is the chain's genesis header.
    fn validate(
        &self,
        storage: &dyn Storage,
        trusted: &Header,
        header: &Header,
        raw: &[u8],
    ) -> Result<(), ContractError>;
}

/// Rejects every relayed header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectUnverifiedHeaders;

impl HeaderValidator for RejectUnverifiedHeaders {
    fn validate(
        &self,
        _storage: &dyn Storage,
        _trusted: &Header,
        header: &Header,
        _raw: &[u8],
    ) -> Result<(), ContractError> {
        Err(ContractError::UnverifiedHeader {
            chain_id: header.chain_id,
            height: header.height,
        })
    }
}

/// (chain_id, height) -> canonical header bytes
const HEADERS: Map<(u64, u32), Binary> = Map::new("header_sync_headers");

/// chain_id -> height of the trusted genesis header
const GENESIS_HEIGHT: Map<u64, u32> = Map::new("header_sync_genesis");

/// chain_id -> highest synchronized height
const CURRENT_HEIGHT: Map<u64, u32> = Map::new("header_sync_current");

/// Header store that trusts a per-chain genesis header and accepts later
/// headers the validator approves.
pub struct StoredHeaderSync {
    validator: Box<dyn HeaderValidator>,
}

impl Default for StoredHeaderSync {
    fn default() -> Self {
        Self::new(Box::new(RejectUnverifiedHeaders))
    }
}

impl StoredHeaderSync {
    pub fn new(validator: Box<dyn HeaderValidator>) -> Self {
        Self { validator }
    }

    /// Install the trusted genesis header of a chain. Each chain gets one.
    pub fn sync_genesis_header(
        storage: &mut dyn Storage,
        raw: &[u8],
    ) -> Result<Header, ContractError> {
        let header = Header::from_bytes(raw)?;
        if GENESIS_HEIGHT.has(storage, header.chain_id) {
            return Err(ContractError::HeaderSync {
                reason: format!("genesis header of chain {} already synced", header.chain_id),
            });
        }
        GENESIS_HEIGHT.save(storage, header.chain_id, &header.height)?;
        CURRENT_HEIGHT.save(storage, header.chain_id, &header.height)?;
        HEADERS.save(
            storage,
            (header.chain_id, header.height),
            &Binary::from(header.to_bytes()),
        )?;
        debug!(
            chain_id = header.chain_id,
            height = header.height,
            "Synced genesis header"
        );
        Ok(header)
    }

    pub fn current_height(
        storage: &dyn Storage,
        chain_id: u64,
    ) -> Result<Option<u32>, ContractError> {
        Ok(CURRENT_HEIGHT.may_load(storage, chain_id)?)
    }
}

impl HeaderSync for StoredHeaderSync {
    fn get_header_by_height(
        &self,
        storage: &dyn Storage,
        chain_id: u64,
        height: u32,
    ) -> Result<Option<Header>, ContractError> {
        HEADERS
            .may_load(storage, (chain_id, height))?
            .map(|raw| Header::from_bytes(&raw).map_err(ContractError::from))
            .transpose()
    }

    fn process_header(
        &self,
        storage: &mut dyn Storage,
        header: &Header,
        raw: &[u8],
    ) -> Result<(), ContractError> {
        let chain_id = header.chain_id;
        let genesis = GENESIS_HEIGHT
            .may_load(storage, chain_id)?
            .ok_or_else(|| ContractError::HeaderSync {
                reason: format!("chain {} has no genesis header", chain_id),
            })?;
        if header.height <= genesis {
            return Err(ContractError::HeaderSync {
                reason: format!(
                    "height {} is not above genesis height {}",
                    header.height, genesis
                ),
            });
        }

        let canonical = Binary::from(header.to_bytes());
        match HEADERS.may_load(storage, (chain_id, header.height))? {
            Some(existing) if existing == canonical => return Ok(()),
            Some(_) => {
                return Err(ContractError::HeaderSync {
                    reason: format!(
                        "conflicting header for chain {} at height {}",
                        chain_id, header.height
                    ),
                })
            }
            None => {}
        }

        let trusted = self
            .get_header_by_height(storage, chain_id, genesis)?
            .ok_or(ContractError::HeaderNotFound {
                chain_id,
                height: genesis,
            })?;
        self.validator.validate(storage, &trusted, header, raw)?;

        HEADERS.save(storage, (chain_id, header.height), &canonical)?;
        let current = CURRENT_HEIGHT.may_load(storage, chain_id)?.unwrap_or(genesis);
        if header.height > current {
            CURRENT_HEIGHT.save(storage, chain_id, &header.height)?;
        }

        debug!(
            chain_id,
            height = header.height,
            hash = %bytes32_to_hex(&keccak256(&canonical)),
            "Synced header"
        );
        Ok(())
    }
}
