use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// A log emitted by a contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub index: u32,
    pub tx_index: u32,
    pub tx_hash: String,
    pub block_number: u64,
    pub block_hash: String,
    pub address: String,
    pub topic0: Vec<u8>,
    pub topic1: Vec<u8>,
    pub topic2: Vec<u8>,
    pub topic3: Vec<u8>,
    pub topic4: Vec<u8>,
    pub data: Vec<u8>,
}

impl Event {
    /// Non-empty topics, in order.
    pub fn topics(&self) -> Vec<&[u8]> {
        [
            &self.topic0,
            &self.topic1,
            &self.topic2,
            &self.topic3,
            &self.topic4,
        ]
        .into_iter()
        .filter(|topic| !topic.is_empty())
        .map(Vec::as_slice)
        .collect()
    }
}

impl Decode for Event {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            index: decoder.read_u32()?,
            tx_index: decoder.read_u32()?,
            tx_hash: decoder.read_string()?,
            block_number: decoder.read_u64()?,
            block_hash: decoder.read_string()?,
            address: decoder.read_string()?,
            topic0: decoder.read_byte_list()?,
            topic1: decoder.read_byte_list()?,
            topic2: decoder.read_byte_list()?,
            topic3: decoder.read_byte_list()?,
            topic4: decoder.read_byte_list()?,
            data: decoder.read_byte_list()?,
        })
    }
}
