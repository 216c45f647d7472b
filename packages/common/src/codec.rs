//! Byte-exact wire codec for native contract parameters.
//!
//! Every structure that crosses a contract boundary (method inputs, the
//! cross-chain envelopes, headers) is encoded with a [`Sink`] and decoded
//! with a [`Source`]. The layout is fixed by the host ledger:
//!
//! | Primitive      | Encoding                                              |
//! |----------------|-------------------------------------------------------|
//! | `u8` / `bool`  | 1 byte (`bool` must be `0x00` or `0x01`)              |
//! | `u32` / `u64`  | fixed width, little-endian                            |
//! | var-uint       | `< 0xFD` inline, `0xFD`+u16, `0xFE`+u32, `0xFF`+u64   |
//! | var-bytes      | var-uint length followed by the bytes                 |
//! | string         | var-bytes holding UTF-8                               |
//! | address        | 20 raw bytes                                          |
//!
//! Arbitrary-precision integers use the Neo big-integer layout: minimal
//! little-endian two's complement, with zero encoded as the empty string.

use cosmwasm_std::Uint256;
use thiserror::Error;

use crate::address::{Address, ADDRESS_LEN};

/// Width of a hash field (block hashes, Merkle roots).
pub const HASH_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("irregular var-uint encoding")]
    IrregularVarUint,

    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid utf-8 string")]
    InvalidUtf8,

    #[error("invalid address length: expected 20 bytes, got {got}")]
    InvalidAddressLength { got: usize },

    #[error("negative integer where an unsigned value is required")]
    NegativeInteger,

    #[error("integer does not fit in {bits} bits")]
    IntegerOverflow { bits: u32 },
}

/// Types with a canonical wire encoding.
pub trait Encode {
    fn encode(&self, sink: &mut Sink);

    fn to_bytes(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        self.encode(&mut sink);
        sink.into_bytes()
    }
}

/// Types that can be read back from their wire encoding.
///
/// Decoding reads a prefix of the input; trailing bytes are left unread,
/// matching how the ledger parses contract inputs.
pub trait Decode: Sized {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError>;

    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::decode(&mut Source::new(bytes))
    }
}

// ============================================================================
// Sink
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct Sink {
    buf: Vec<u8>,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_var_uint(&mut self, value: u64) {
        if value < 0xFD {
            self.buf.push(value as u8);
        } else if value <= 0xFFFF {
            self.buf.push(0xFD);
            self.buf.extend_from_slice(&(value as u16).to_le_bytes());
        } else if value <= 0xFFFF_FFFF {
            self.buf.push(0xFE);
            self.buf.extend_from_slice(&(value as u32).to_le_bytes());
        } else {
            self.buf.push(0xFF);
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_var_uint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    /// Raw 20-byte address.
    pub fn write_address(&mut self, address: &Address) {
        self.buf.extend_from_slice(address.as_bytes());
    }

    /// Address wrapped as var-bytes, the form used by asset parameters.
    pub fn write_encoded_address(&mut self, address: &Address) {
        self.write_var_bytes(address.as_bytes());
    }

    pub fn write_hash(&mut self, hash: &[u8; HASH_LEN]) {
        self.buf.extend_from_slice(hash);
    }

    /// `u64` as var-bytes of its Neo big-integer encoding.
    pub fn write_neo_u64(&mut self, value: u64) {
        self.write_var_bytes(&u64_to_neo_bytes(value));
    }

    /// `Uint256` as var-bytes of its Neo big-integer encoding.
    pub fn write_neo_uint256(&mut self, value: Uint256) {
        self.write_var_bytes(&uint256_to_neo_bytes(value));
    }
}

// ============================================================================
// Source
// ============================================================================

#[derive(Debug, Clone)]
pub struct Source<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Source<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a compact-size integer, rejecting non-minimal forms.
    pub fn read_var_uint(&mut self) -> Result<u64, CodecError> {
        let (value, min) = match self.read_u8()? {
            0xFD => (u64::from(self.read_u16()?), 0xFD),
            0xFE => (u64::from(self.read_u32()?), 0x1_0000),
            0xFF => (self.read_u64()?, 0x1_0000_0000),
            small => return Ok(u64::from(small)),
        };
        if value < min {
            return Err(CodecError::IrregularVarUint);
        }
        Ok(value)
    }

    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_var_uint()?;
        // A length larger than the input can never be satisfied.
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.read_bytes(len)
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let bytes = self.read_var_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_address(&mut self) -> Result<Address, CodecError> {
        Ok(Address(self.read_array::<ADDRESS_LEN>()?))
    }

    pub fn read_encoded_address(&mut self) -> Result<Address, CodecError> {
        Address::from_slice(self.read_var_bytes()?)
    }

    pub fn read_hash(&mut self) -> Result<[u8; HASH_LEN], CodecError> {
        self.read_array()
    }

    pub fn read_neo_u64(&mut self) -> Result<u64, CodecError> {
        neo_bytes_to_u64(self.read_var_bytes()?)
    }

    pub fn read_neo_uint256(&mut self) -> Result<Uint256, CodecError> {
        neo_bytes_to_uint256(self.read_var_bytes()?)
    }
}

// ============================================================================
// Neo big-integer bytes
// ============================================================================

/// Minimal little-endian two's complement of a non-negative integer given
/// as little-endian magnitude bytes.
fn magnitude_to_neo_bytes(le: &[u8]) -> Vec<u8> {
    let len = le.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    let mut out = le[..len].to_vec();
    if out.last().is_some_and(|b| b & 0x80 != 0) {
        out.push(0);
    }
    out
}

/// Little-endian magnitude of a non-negative Neo integer, trimmed of
/// trailing zero bytes.
fn neo_bytes_to_magnitude(bytes: &[u8]) -> Result<&[u8], CodecError> {
    if bytes.last().is_some_and(|b| b & 0x80 != 0) {
        return Err(CodecError::NegativeInteger);
    }
    let len = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    Ok(&bytes[..len])
}

pub fn u64_to_neo_bytes(value: u64) -> Vec<u8> {
    magnitude_to_neo_bytes(&value.to_le_bytes())
}

pub fn neo_bytes_to_u64(bytes: &[u8]) -> Result<u64, CodecError> {
    let magnitude = neo_bytes_to_magnitude(bytes)?;
    if magnitude.len() > 8 {
        return Err(CodecError::IntegerOverflow { bits: 64 });
    }
    let mut buf = [0u8; 8];
    buf[..magnitude.len()].copy_from_slice(magnitude);
    Ok(u64::from_le_bytes(buf))
}

pub fn uint256_to_neo_bytes(value: Uint256) -> Vec<u8> {
    magnitude_to_neo_bytes(&value.to_le_bytes())
}

pub fn neo_bytes_to_uint256(bytes: &[u8]) -> Result<Uint256, CodecError> {
    let magnitude = neo_bytes_to_magnitude(bytes)?;
    if magnitude.len() > 32 {
        return Err(CodecError::IntegerOverflow { bits: 256 });
    }
    let mut buf = [0u8; 32];
    buf[..magnitude.len()].copy_from_slice(magnitude);
    Ok(Uint256::from_le_bytes(buf))
}
