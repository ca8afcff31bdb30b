//! ABI-typed values returned by input parsing.
//!
//! Each value is a `{tag: payload}` map. Payloads by tag:
//!
//! | Tag | Payload |
//! |-----|---------|
//! | `Bool` | bool |
//! | `Uint`, `Int` | hex string, optional `0x`, at most 64 digits |
//! | `String`, `Address` | string |
//! | `Bytes`, `FixedBytes` | array of byte integers |
//! | `Array`, `FixedArray`, `Tuple` | array of values |
//!
//! `Int` carries the two's-complement bit pattern; [`I256`] gives it signed meaning.

use anyhow::Result;
use daemon_sdk_core::bigint::{hex_to_u256, I256, U256};
use daemon_sdk_core::encoding::parse_hex_bytes;
use daemon_sdk_core::value::read_value_tag;
use daemon_sdk_core::{DecodeError, Decoder, SdkConfig, ValueError};

#[derive(Debug, Clone, PartialEq)]
pub enum EvmValue {
    Bool(bool),
    Uint(U256),
    Int(I256),
    String(String),
    Address(String),
    Bytes(Vec<u8>),
    FixedBytes(Vec<u8>),
    Array(Vec<EvmValue>),
    FixedArray(Vec<EvmValue>),
    Tuple(Vec<EvmValue>),
}

impl EvmValue {
    /// Decode the top-level array of values produced by the host. Bytes left
    /// after the array follow the configured trailing-byte policy.
    pub fn from_bytes(bytes: &[u8], config: &SdkConfig) -> Result<Vec<Self>, DecodeError> {
        let mut decoder = Decoder::with_config(bytes, config);
        let values = decoder.read_array(Self::decode)?;
        decoder.check_trailing("values")?;
        Ok(values)
    }

    pub fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let tag = read_value_tag(decoder)?;

        let value = match tag {
            "Bool" => EvmValue::Bool(decoder.read_bool()?),
            "Uint" => EvmValue::Uint(hex_to_u256(decoder.read_str()?)?),
            "Int" => EvmValue::Int(I256::from_hex(decoder.read_str()?)?),
            "String" => EvmValue::String(decoder.read_string()?),
            "Address" => EvmValue::Address(decoder.read_string()?),
            "Bytes" => EvmValue::Bytes(decoder.read_byte_list()?),
            "FixedBytes" => EvmValue::FixedBytes(decoder.read_byte_list()?),
            "Array" => EvmValue::Array(Self::decode_children(decoder)?),
            "FixedArray" => EvmValue::FixedArray(Self::decode_children(decoder)?),
            "Tuple" => EvmValue::Tuple(Self::decode_children(decoder)?),
            other => return Err(DecodeError::UnknownValueTag(other.to_string())),
        };

        Ok(value)
    }

    fn decode_children(decoder: &mut Decoder<'_>) -> Result<Vec<Self>, DecodeError> {
        decoder.nested(|d| d.read_array(Self::decode))
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            EvmValue::Bool(_) => "Bool",
            EvmValue::Uint(_) => "Uint",
            EvmValue::Int(_) => "Int",
            EvmValue::String(_) => "String",
            EvmValue::Address(_) => "Address",
            EvmValue::Bytes(_) => "Bytes",
            EvmValue::FixedBytes(_) => "FixedBytes",
            EvmValue::Array(_) => "Array",
            EvmValue::FixedArray(_) => "FixedArray",
            EvmValue::Tuple(_) => "Tuple",
        }
    }

    fn wrong(&self, expected: &'static str) -> ValueError {
        ValueError::WrongVariant {
            expected,
            found: self.variant_name(),
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, EvmValue::Bool(_))
    }

    pub fn is_uint(&self) -> bool {
        matches!(self, EvmValue::Uint(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, EvmValue::Int(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, EvmValue::String(_))
    }

    pub fn is_address(&self) -> bool {
        matches!(self, EvmValue::Address(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, EvmValue::Bytes(_))
    }

    pub fn is_fixed_bytes(&self) -> bool {
        matches!(self, EvmValue::FixedBytes(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, EvmValue::Array(_))
    }

    pub fn is_fixed_array(&self) -> bool {
        matches!(self, EvmValue::FixedArray(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, EvmValue::Tuple(_))
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            EvmValue::Bool(v) => Ok(*v),
            _ => Err(self.wrong("Bool")),
        }
    }

    pub fn as_uint(&self) -> Result<U256, ValueError> {
        match self {
            EvmValue::Uint(v) => Ok(*v),
            _ => Err(self.wrong("Uint")),
        }
    }

    pub fn as_int(&self) -> Result<I256, ValueError> {
        match self {
            EvmValue::Int(v) => Ok(*v),
            _ => Err(self.wrong("Int")),
        }
    }

    pub fn as_string(&self) -> Result<&str, ValueError> {
        match self {
            EvmValue::String(v) => Ok(v),
            _ => Err(self.wrong("String")),
        }
    }

    pub fn as_address(&self) -> Result<&str, ValueError> {
        match self {
            EvmValue::Address(v) => Ok(v),
            _ => Err(self.wrong("Address")),
        }
    }

    /// The address decoded from hex.
    pub fn as_address_bytes(&self) -> Result<Vec<u8>> {
        let address = self.as_address()?;
        parse_hex_bytes(address, "address")
    }

    pub fn as_bytes(&self) -> Result<&[u8], ValueError> {
        match self {
            EvmValue::Bytes(v) => Ok(v),
            _ => Err(self.wrong("Bytes")),
        }
    }

    pub fn as_fixed_bytes(&self) -> Result<&[u8], ValueError> {
        match self {
            EvmValue::FixedBytes(v) => Ok(v),
            _ => Err(self.wrong("FixedBytes")),
        }
    }

    pub fn as_array(&self) -> Result<&[EvmValue], ValueError> {
        match self {
            EvmValue::Array(v) => Ok(v),
            _ => Err(self.wrong("Array")),
        }
    }

    pub fn as_fixed_array(&self) -> Result<&[EvmValue], ValueError> {
        match self {
            EvmValue::FixedArray(v) => Ok(v),
            _ => Err(self.wrong("FixedArray")),
        }
    }

    pub fn as_tuple(&self) -> Result<&[EvmValue], ValueError> {
        match self {
            EvmValue::Tuple(v) => Ok(v),
            _ => Err(self.wrong("Tuple")),
        }
    }
}
