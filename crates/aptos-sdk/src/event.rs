use daemon_sdk_core::{Decode, DecodeError, Decoder};

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub tx_seq: u64,
    /// Event handle GUID.
    pub key: String,
    pub sequence_number: u64,
    pub typ: String,
    /// BCS-encoded payload.
    pub data: Vec<u8>,
}

impl Decode for Event {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx_seq: decoder.read_u64()?,
            key: decoder.read_string()?,
            sequence_number: decoder.read_u64()?,
            typ: decoder.read_string()?,
            data: decoder.read_byte_array()?,
        })
    }
}
