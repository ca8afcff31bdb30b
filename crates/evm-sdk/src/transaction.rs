use daemon_sdk_core::{Decode, DecodeError, Decoder};

/// An EVM transaction as seen by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Position within the block.
    pub tx_index: u32,
    pub tx_hash: String,
    /// EIP-2718 transaction type.
    pub typ: u8,
    pub nonce: u64,
    pub status: u64,
    pub block_index: u64,
    pub from: String,
    /// `None` for contract creation.
    pub to: Option<String>,
    pub value: u64,
    pub fee: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// Calldata.
    pub input: Vec<u8>,
    pub size: f64,
}

impl Transaction {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

impl Decode for Transaction {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx_index: decoder.read_u32()?,
            tx_hash: decoder.read_string()?,
            typ: decoder.read_u8()?,
            nonce: decoder.read_u64()?,
            status: decoder.read_u64()?,
            block_index: decoder.read_u64()?,
            from: decoder.read_string()?,
            to: decoder.read_optional(|d| d.read_string())?,
            value: decoder.read_u64()?,
            fee: decoder.read_u64()?,
            gas_price: decoder.read_u64()?,
            gas_limit: decoder.read_u64()?,
            gas_used: decoder.read_u64()?,
            input: decoder.read_byte_array()?,
            size: decoder.read_f64()?,
        })
    }
}
