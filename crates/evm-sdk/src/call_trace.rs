use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// One internal call made while executing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTrace {
    pub seq: u32,
    pub tx_index: u32,
    pub block_index: u64,
    pub depth: u32,
    /// CALL, DELEGATECALL, STATICCALL, CREATE, ...
    pub typ: String,
    pub from: String,
    pub to: String,
    pub value: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub input: Vec<u8>,
}

impl Decode for CallTrace {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u32()?,
            tx_index: decoder.read_u32()?,
            block_index: decoder.read_u64()?,
            depth: decoder.read_u32()?,
            typ: decoder.read_string()?,
            from: decoder.read_string()?,
            to: decoder.read_string()?,
            value: decoder.read_u64()?,
            gas_limit: decoder.read_u64()?,
            gas_used: decoder.read_u64()?,
            input: decoder.read_byte_list()?,
        })
    }
}
