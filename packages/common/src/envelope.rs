//! Cross-chain message envelopes and relay-chain headers.
//!
//! A [`MakeTxParam`] is what the source chain commits to its cross-state
//! accumulator. The relay chain wraps it in a [`ToMerkleValue`] and the
//! destination chain proves that value against a synchronized [`Header`].

use cosmwasm_std::Binary;

use crate::address::Address;
use crate::codec::{CodecError, Decode, Encode, Sink, Source, HASH_LEN};

/// Outbound message as persisted and committed on the source chain.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MakeTxParam {
    pub tx_hash: Binary,
    /// Opaque id; native chains put the little-endian `u64` counter here.
    pub cross_chain_id: Binary,
    pub from_contract_address: Binary,
    pub to_chain_id: u64,
    pub to_contract_address: Binary,
    pub method: String,
    pub args: Binary,
}

impl Encode for MakeTxParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_var_bytes(&self.tx_hash);
        sink.write_var_bytes(&self.cross_chain_id);
        sink.write_var_bytes(&self.from_contract_address);
        sink.write_u64(self.to_chain_id);
        sink.write_var_bytes(&self.to_contract_address);
        sink.write_string(&self.method);
        sink.write_var_bytes(&self.args);
    }
}

impl Decode for MakeTxParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(MakeTxParam {
            tx_hash: source.read_var_bytes()?.into(),
            cross_chain_id: source.read_var_bytes()?.into(),
            from_contract_address: source.read_var_bytes()?.into(),
            to_chain_id: source.read_u64()?,
            to_contract_address: source.read_var_bytes()?.into(),
            method: source.read_string()?,
            args: source.read_var_bytes()?.into(),
        })
    }
}

/// Leaf value proven against the relay chain's cross-state root.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ToMerkleValue {
    pub tx_hash: Binary,
    pub from_chain_id: u64,
    pub make_tx_param: MakeTxParam,
}

impl Encode for ToMerkleValue {
    fn encode(&self, sink: &mut Sink) {
        sink.write_var_bytes(&self.tx_hash);
        sink.write_u64(self.from_chain_id);
        self.make_tx_param.encode(sink);
    }
}

impl Decode for ToMerkleValue {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(ToMerkleValue {
            tx_hash: source.read_var_bytes()?.into(),
            from_chain_id: source.read_u64()?,
            make_tx_param: MakeTxParam::decode(source)?,
        })
    }
}

/// Input of `createCrossChainTx`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CreateCrossChainTxParam {
    pub to_chain_id: u64,
    pub to_contract_address: Binary,
    pub method: String,
    pub args: Binary,
}

impl Encode for CreateCrossChainTxParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_u64(self.to_chain_id);
        sink.write_var_bytes(&self.to_contract_address);
        sink.write_string(&self.method);
        sink.write_var_bytes(&self.args);
    }
}

impl Decode for CreateCrossChainTxParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(CreateCrossChainTxParam {
            to_chain_id: source.read_u64()?,
            to_contract_address: source.read_var_bytes()?.into(),
            method: source.read_string()?,
            args: source.read_var_bytes()?.into(),
        })
    }
}

/// Input of `processCrossChainTx`, submitted by a relayer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProcessCrossChainTxParam {
    pub from_chain_id: u64,
    pub height: u32,
    /// Serialized [`Header`]; empty when the header is already synchronized.
    pub header: Binary,
    /// Hex-encoded Merkle proof.
    pub proof: String,
}

impl Encode for ProcessCrossChainTxParam {
    fn encode(&self, sink: &mut Sink) {
        sink.write_u64(self.from_chain_id);
        sink.write_u32(self.height);
        sink.write_var_bytes(&self.header);
        sink.write_string(&self.proof);
    }
}

impl Decode for ProcessCrossChainTxParam {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(ProcessCrossChainTxParam {
            from_chain_id: source.read_u64()?,
            height: source.read_u32()?,
            header: source.read_var_bytes()?.into(),
            proof: source.read_string()?,
        })
    }
}

/// Relay-chain block header, without signatures.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Header {
    pub version: u32,
    pub chain_id: u64,
    pub prev_block_hash: [u8; HASH_LEN],
    pub transactions_root: [u8; HASH_LEN],
    pub cross_state_root: [u8; HASH_LEN],
    pub block_root: [u8; HASH_LEN],
    pub timestamp: u32,
    pub height: u32,
    pub consensus_data: u64,
    pub consensus_payload: Binary,
    pub next_bookkeeper: Address,
}

impl Encode for Header {
    fn encode(&self, sink: &mut Sink) {
        sink.write_u32(self.version);
        sink.write_u64(self.chain_id);
        sink.write_hash(&self.prev_block_hash);
        sink.write_hash(&self.transactions_root);
        sink.write_hash(&self.cross_state_root);
        sink.write_hash(&self.block_root);
        sink.write_u32(self.timestamp);
        sink.write_u32(self.height);
        sink.write_u64(self.consensus_data);
        sink.write_var_bytes(&self.consensus_payload);
        sink.write_address(&self.next_bookkeeper);
    }
}

impl Decode for Header {
    fn decode(source: &mut Source<'_>) -> Result<Self, CodecError> {
        Ok(Header {
            version: source.read_u32()?,
            chain_id: source.read_u64()?,
            prev_block_hash: source.read_hash()?,
            transactions_root: source.read_hash()?,
            cross_state_root: source.read_hash()?,
            block_root: source.read_hash()?,
            timestamp: source.read_u32()?,
            height: source.read_u32()?,
            consensus_data: source.read_u64()?,
            consensus_payload: source.read_var_bytes()?.into(),
            next_bookkeeper: source.read_address()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_param() -> MakeTxParam {
        MakeTxParam {
            tx_hash: Binary::from(vec![0x11; 32]),
            cross_chain_id: Binary::from(7u64.to_le_bytes().to_vec()),
            from_contract_address: Binary::from(Address::builtin(0x0a).0.to_vec()),
            to_chain_id: 2,
            to_contract_address: Binary::from(vec![0xBB; 20]),
            method: "unlock".to_string(),
            args: Binary::from(vec![1, 2, 3]),
        }
    }

    #[test]
    fn test_make_tx_param_layout() {
        let bytes = sample_param().to_bytes();

        // tx hash: var-bytes of 32
        assert_eq!(bytes[0], 32);
        assert_eq!(&bytes[1..33], &[0x11; 32]);
        // cross chain id: var-bytes of 8
        assert_eq!(bytes[33], 8);
        assert_eq!(&bytes[34..42], &7u64.to_le_bytes());
        // from contract: var-bytes of 20
        assert_eq!(bytes[42], 20);
        // to chain id: fixed u64 after the address
        assert_eq!(&bytes[63..71], &2u64.to_le_bytes());
        // to contract
        assert_eq!(bytes[71], 20);
        // method
        assert_eq!(bytes[92], 6);
        assert_eq!(&bytes[93..99], b"unlock");
        // args
        assert_eq!(&bytes[99..], &[3, 1, 2, 3]);

        assert_eq!(MakeTxParam::from_bytes(&bytes).unwrap(), sample_param());
    }

    #[test]
    fn test_to_merkle_value_embeds_make_tx_param() {
        let value = ToMerkleValue {
            tx_hash: Binary::from(vec![0x22; 32]),
            from_chain_id: 5,
            make_tx_param: sample_param(),
        };
        let bytes = value.to_bytes();
        assert_eq!(&bytes[33..41], &5u64.to_le_bytes());
        assert_eq!(&bytes[41..], sample_param().to_bytes().as_slice());
        assert_eq!(ToMerkleValue::from_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn test_empty_fields_survive() {
        let param = MakeTxParam::default();
        let bytes = param.to_bytes();
        // six empty var-bytes/strings plus the fixed chain id
        assert_eq!(bytes.len(), 6 + 8);
        assert_eq!(MakeTxParam::from_bytes(&bytes).unwrap(), param);
    }

    #[test]
    fn test_create_param_round_trip() {
        let param = CreateCrossChainTxParam {
            to_chain_id: 2,
            to_contract_address: Binary::from(vec![0xE1; 20]),
            method: "unlock".to_string(),
            args: Binary::from(vec![9; 30]),
        };
        let bytes = param.to_bytes();
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
        assert_eq!(bytes[8], 20);
        assert_eq!(&bytes[29..36], &[6, b'u', b'n', b'l', b'o', b'c', b'k']);
        assert_eq!(CreateCrossChainTxParam::from_bytes(&bytes).unwrap(), param);

        let empty = CreateCrossChainTxParam::default();
        let bytes = empty.to_bytes();
        assert_eq!(bytes.len(), 8 + 3);
        assert_eq!(CreateCrossChainTxParam::from_bytes(&bytes).unwrap(), empty);
    }

    #[test]
    fn test_truncated_envelope_rejected() {
        let bytes = sample_param().to_bytes();
        assert!(MakeTxParam::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_header_layout() {
        let header = Header {
            version: 1,
            chain_id: 0,
            cross_state_root: [0xCC; 32],
            height: 100,
            consensus_payload: Binary::from(b"payload".to_vec()),
            next_bookkeeper: Address::builtin(1),
            ..Default::default()
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), 4 + 8 + 32 * 4 + 4 + 4 + 8 + 1 + 7 + 20);
        // cross state root is the third hash
        assert_eq!(&bytes[12 + 64..12 + 96], &[0xCC; 32]);
        assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_process_param_order() {
        let param = ProcessCrossChainTxParam {
            from_chain_id: 0,
            height: 9,
            header: Binary::default(),
            proof: "abcd".to_string(),
        };
        let bytes = param.to_bytes();
        assert_eq!(&bytes[8..12], &9u32.to_le_bytes());
        assert_eq!(bytes[12], 0);
        assert_eq!(&bytes[13..], &[4, b'a', b'b', b'c', b'd']);
        assert_eq!(ProcessCrossChainTxParam::from_bytes(&bytes).unwrap(), param);
    }
}
