use anyhow::{Context, Result};
use daemon_sdk_core::encoding::hex_encode_prefixed;
use daemon_sdk_core::HostBridge;

use crate::value::EvmValue;

/// Transaction calldata that can be decoded against an ABI signature by the host.
#[derive(Debug, Clone, Copy)]
pub struct TxInput<'a> {
    data: &'a [u8],
    bridge: &'a HostBridge,
}

impl<'a> TxInput<'a> {
    pub fn new(data: &'a [u8], bridge: &'a HostBridge) -> Self {
        Self { data, bridge }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The 4-byte function selector, if the input is long enough.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4)?.try_into().ok()
    }

    pub fn to_hex(&self) -> String {
        hex_encode_prefixed(self.data)
    }

    /// Decode the input against `abi`, e.g. `"function transfer(address,uint256)"`.
    ///
    /// Returns `None` when the input does not match the signature.
    pub fn parse(&self, abi: &str) -> Result<Option<Vec<EvmValue>>> {
        let Some(buffer) = self.bridge.parse_input(abi, self.data)? else {
            return Ok(None);
        };

        let values = EvmValue::from_bytes(buffer.as_slice(), self.bridge.config())
            .with_context(|| format!("Failed to decode input values for '{}'", abi))?;

        Ok(Some(values))
    }
}
