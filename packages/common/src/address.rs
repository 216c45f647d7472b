//! 20-byte ledger addresses.
//!
//! Native contracts live at fixed, well-known addresses whose last byte is
//! the contract index (see [`Address::builtin`]). User accounts and VM
//! contracts are arbitrary 20-byte values.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

pub const ADDRESS_LEN: usize = 20;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Address of a built-in native contract: nineteen zero bytes followed
    /// by the contract index.
    pub const fn builtin(index: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 1] = index;
        Address(bytes)
    }

    /// Parse from exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidAddressLength { got: bytes.len() })?;
        Ok(Address(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Parses `0x`-prefixed or bare hex.
impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| CodecError::InvalidAddressLength {
            got: s.len() / 2,
        })?;
        Address::from_slice(&bytes)
    }
}
