//! Generic value trees for call trace arguments.
//!
//! On the wire every value is a single-entry map `{tag: payload}`:
//!
//! | Tag | Variant | Payload |
//! |-----|---------|---------|
//! | `"b"` | [`Value::Bool`] | bool |
//! | `"u64"` | [`Value::U64`] | unsigned integer |
//! | `"s"` | [`Value::String`] | string |
//! | `"l"` | [`Value::List`] | array of values |
//! | `"st"` | [`Value::Struct`] | `[type name, {field name: value}]` |
//!
//! Struct fields keep the order the host wrote them in.

use crate::codec::Decoder;
use crate::config::SdkConfig;
use crate::errors::{DecodeError, ValueError};

const BOOL_TAG: &str = "b";
const U64_TAG: &str = "u64";
const STRING_TAG: &str = "s";
const LIST_TAG: &str = "l";
const STRUCT_TAG: &str = "st";

/// Read the `{tag: ...}` envelope and return the tag. The payload follows.
///
/// Shared by every tagged value family.
pub fn read_value_tag<'a>(decoder: &mut Decoder<'a>) -> Result<&'a str, DecodeError> {
    let position = decoder.position();
    let len = decoder.read_map_len()?;
    if len != 1 {
        return Err(DecodeError::InvalidTagMap { position, len });
    }

    decoder.read_str()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U64(u64),
    String(String),
    List(Vec<Value>),
    Struct(StructValue),
}

/// A named record with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub ty: String,
    pub fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn new(ty: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            ty: ty.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl Value {
    /// Decode a single value. Bytes left after it follow the configured
    /// trailing-byte policy.
    pub fn from_bytes(bytes: &[u8], config: &SdkConfig) -> Result<Self, DecodeError> {
        let mut decoder = Decoder::with_config(bytes, config);
        let value = Self::decode(&mut decoder)?;
        decoder.check_trailing("value")?;
        Ok(value)
    }

    pub fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let tag = read_value_tag(decoder)?;

        match tag {
            BOOL_TAG => Ok(Value::Bool(decoder.read_bool()?)),
            U64_TAG => Ok(Value::U64(decoder.read_u64()?)),
            STRING_TAG => Ok(Value::String(decoder.read_string()?)),
            LIST_TAG => decoder.nested(|d| d.read_array(Value::decode).map(Value::List)),
            STRUCT_TAG => decoder.nested(|d| Self::decode_struct(d).map(Value::Struct)),
            other => Err(DecodeError::UnknownValueTag(other.to_string())),
        }
    }

    fn decode_struct(decoder: &mut Decoder<'_>) -> Result<StructValue, DecodeError> {
        let position = decoder.position();
        let len = decoder.read_array_len()?;
        if len != 2 {
            return Err(DecodeError::InvalidStructArity { position, len });
        }

        let ty = decoder.read_string()?;
        let count = decoder.read_map_len()? as usize;
        let mut fields = Vec::with_capacity(count.min(decoder.remaining()));

        for _ in 0..count {
            let name = decoder.read_string()?;
            let value = Value::decode(decoder)?;
            fields.push((name, value));
        }

        Ok(StructValue { ty, fields })
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::U64(_) => "U64",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Struct(_) => "Struct",
        }
    }

    fn wrong(&self, expected: &'static str) -> ValueError {
        ValueError::WrongVariant {
            expected,
            found: self.variant_name(),
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_u64(&self) -> bool {
        matches!(self, Value::U64(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(_))
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(self.wrong("Bool")),
        }
    }

    pub fn as_u64(&self) -> Result<u64, ValueError> {
        match self {
            Value::U64(v) => Ok(*v),
            _ => Err(self.wrong("U64")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(v) => Ok(v),
            _ => Err(self.wrong("String")),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::List(v) => Ok(v),
            _ => Err(self.wrong("List")),
        }
    }

    pub fn as_struct(&self) -> Result<&StructValue, ValueError> {
        match self {
            Value::Struct(v) => Ok(v),
            _ => Err(self.wrong("Struct")),
        }
    }
}
