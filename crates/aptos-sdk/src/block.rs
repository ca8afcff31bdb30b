use daemon_sdk_core::{Decode, DecodeError, Decoder};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub hash: String,
    pub epoch: u64,
    pub timestamp_usecs: u64,
}

impl Decode for Block {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hash: decoder.read_string()?,
            epoch: decoder.read_u64()?,
            timestamp_usecs: decoder.read_u64()?,
        })
    }
}
