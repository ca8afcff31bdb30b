use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// A committed Aptos user transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub seq: u64,
    pub block_hash: String,
    pub hash: String,
    pub event_root_hash: String,
    pub state_change_hash: String,
    pub gas_used: u64,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    /// VM status code, 0 on success.
    pub status: u64,
    pub sender: String,
    /// Sender account sequence number.
    pub sequence_number: u64,
}

impl Transaction {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Upper bound on the fee, in octas.
    pub fn max_fee(&self) -> u64 {
        self.max_gas_amount.saturating_mul(self.gas_unit_price)
    }
}

impl Decode for Transaction {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u64()?,
            block_hash: decoder.read_string()?,
            hash: decoder.read_string()?,
            event_root_hash: decoder.read_string()?,
            state_change_hash: decoder.read_string()?,
            gas_used: decoder.read_u64()?,
            max_gas_amount: decoder.read_u64()?,
            gas_unit_price: decoder.read_u64()?,
            expiration_timestamp_secs: decoder.read_u64()?,
            status: decoder.read_u64()?,
            sender: decoder.read_string()?,
            sequence_number: decoder.read_u64()?,
        })
    }
}
