use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// An executed Sui transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub seq: u64,
    pub digest: String,
    /// Checkpoint timestamp, milliseconds since the epoch.
    pub time: i64,
    pub gas_used: u64,
    pub gas_computation_cost: u64,
    pub gas_storage_cost: u64,
    pub gas_budget: u64,
    pub sender: String,
    pub kind: String,
}

impl Decode for Transaction {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u64()?,
            digest: decoder.read_string()?,
            time: decoder.read_i64()?,
            gas_used: decoder.read_u64()?,
            gas_computation_cost: decoder.read_u64()?,
            gas_storage_cost: decoder.read_u64()?,
            gas_budget: decoder.read_u64()?,
            sender: decoder.read_string()?,
            kind: decoder.read_string()?,
        })
    }
}
