use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// A Move event emitted by a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub tx_seq: u64,
    pub package_id: String,
    pub transaction_module: String,
    pub sender: String,
    /// Fully qualified Move struct type of the event.
    pub typ: String,
    /// BCS-encoded event contents.
    pub contents: Vec<u8>,
}

impl Decode for Event {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx_seq: decoder.read_u64()?,
            package_id: decoder.read_string()?,
            transaction_module: decoder.read_string()?,
            sender: decoder.read_string()?,
            typ: decoder.read_string()?,
            contents: decoder.read_byte_array()?,
        })
    }
}
