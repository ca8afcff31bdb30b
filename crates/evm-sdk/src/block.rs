//! EVM block header.

use daemon_sdk_core::{Decode, DecodeError, Decoder};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block number. Transactions join on this.
    pub block_index: u64,
    pub hash: String,
    pub parent_hash: String,
    pub state_root: String,
    pub nonce: u64,
    pub status: String,
    /// Unix seconds.
    pub timestamp: u64,
    /// Big-endian reward amount as raw bytes.
    pub block_reward: Vec<u8>,
    pub fee_recipient: String,
    pub total_difficulty: u64,
    pub size: f64,
    pub gas_used: u64,
    pub gas_limit: u64,
}

impl Decode for Block {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            block_index: decoder.read_u64()?,
            hash: decoder.read_string()?,
            parent_hash: decoder.read_string()?,
            state_root: decoder.read_string()?,
            nonce: decoder.read_u64()?,
            status: decoder.read_string()?,
            timestamp: decoder.read_u64()?,
            block_reward: decoder.read_byte_array()?,
            fee_recipient: decoder.read_string()?,
            total_difficulty: decoder.read_u64()?,
            size: decoder.read_f64()?,
            gas_used: decoder.read_u64()?,
            gas_limit: decoder.read_u64()?,
        })
    }
}
