//! Node-level bridge configuration
//!
//! The well-known native contract addresses and the local chain id are fixed
//! at genesis. Deployments may override them through `BRIDGE_*` environment
//! variables (optionally from a `.env` file).

use std::env;
use std::path::Path;
use std::str::FromStr;

use common::Address;
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

/// Chain id of this ledger in the cross-chain network.
pub const DEFAULT_LOCAL_CHAIN_ID: u64 = 3;

pub const NATIVE_TOKEN_ADDRESS: Address = Address::builtin(0x01);
pub const GAS_TOKEN_ADDRESS: Address = Address::builtin(0x02);
pub const PARAMS_CONTRACT_ADDRESS: Address = Address::builtin(0x04);
pub const CROSS_CHAIN_MANAGER_ADDRESS: Address = Address::builtin(0x09);
pub const LOCK_PROXY_ADDRESS: Address = Address::builtin(0x0a);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    pub local_chain_id: u64,
    pub cross_chain_manager: Address,
    pub lock_proxy: Address,
    /// Native token; one of the two assets the lock proxy custodies.
    pub native_token: Address,
    /// Gas token; the other custodied asset.
    pub gas_token: Address,
    /// Holder of the operator role.
    pub params_contract: Address,
    /// Record contract notifications in the execution outcome.
    #[serde(default = "default_enable_event_log")]
    pub enable_event_log: bool,
}

fn default_enable_event_log() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            local_chain_id: DEFAULT_LOCAL_CHAIN_ID,
            cross_chain_manager: CROSS_CHAIN_MANAGER_ADDRESS,
            lock_proxy: LOCK_PROXY_ADDRESS,
            native_token: NATIVE_TOKEN_ADDRESS,
            gas_token: GAS_TOKEN_ADDRESS,
            params_contract: PARAMS_CONTRACT_ADDRESS,
            enable_event_log: default_enable_event_log(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables
    /// Loads .env file if present, then reads from environment
    pub fn load() -> Result<Self> {
        Self::load_from_file(".env")
    }

    /// Load from a specific .env file path
    pub fn load_from_file(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            dotenvy::from_filename(path)
                .wrap_err_with(|| format!("Failed to load .env file from {}", path))?;
            tracing::debug!(path, "Loaded bridge .env file");
        }
        Self::load_from_env()
    }

    /// Start from the genesis defaults and apply any `BRIDGE_*` overrides
    pub fn load_from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            local_chain_id: env_or("BRIDGE_LOCAL_CHAIN_ID", defaults.local_chain_id)?,
            cross_chain_manager: env_or(
                "BRIDGE_CROSS_CHAIN_MANAGER",
                defaults.cross_chain_manager,
            )?,
            lock_proxy: env_or("BRIDGE_LOCK_PROXY", defaults.lock_proxy)?,
            native_token: env_or("BRIDGE_NATIVE_TOKEN", defaults.native_token)?,
            gas_token: env_or("BRIDGE_GAS_TOKEN", defaults.gas_token)?,
            params_contract: env_or("BRIDGE_PARAMS_CONTRACT", defaults.params_contract)?,
            enable_event_log: env_or("BRIDGE_ENABLE_EVENT_LOG", defaults.enable_event_log)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.local_chain_id == 0 {
            return Err(eyre!("local_chain_id cannot be 0"));
        }

        let contracts = [
            ("cross_chain_manager", self.cross_chain_manager),
            ("lock_proxy", self.lock_proxy),
            ("native_token", self.native_token),
            ("gas_token", self.gas_token),
            ("params_contract", self.params_contract),
        ];
        for (i, (name, address)) in contracts.iter().enumerate() {
            if *address == Address::default() {
                return Err(eyre!("{} cannot be the zero address", name));
            }
            if let Some((other, _)) = contracts[i + 1..].iter().find(|(_, a)| a == address) {
                return Err(eyre!("{} and {} share address {}", name, other, address));
            }
        }
        Ok(())
    }

    /// The lock proxy only custodies the native token and the gas token.
    pub fn is_supported_asset(&self, asset: &Address) -> bool {
        *asset == self.native_token || *asset == self.gas_token
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| eyre!("{} is invalid: {}", key, e)),
        Err(_) => Ok(default),
    }
}
