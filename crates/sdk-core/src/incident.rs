//! Incident reports and their JSON wire form.
//!
//! The host ingests incidents as a single JSON object with keys in a fixed
//! order: `severity`, `message`, then `address` and `tx_hash` when non-empty,
//! then `data` when present. Numbers are always rendered with a fractional
//! part (`42.0`) and raw payloads as standard base64.
//!
//! # Example
//!
//! ```
//! use daemon_sdk_core::incident::{Incident, IncidentDataStruct, IncidentSeverity};
//!
//! let mut data = IncidentDataStruct::new();
//! data.add_string("hello", "I am a mine turtle");
//!
//! let incident = Incident::new(IncidentSeverity::Alert, "An incident").with_data(data);
//! assert_eq!(
//!     incident.to_json().unwrap(),
//!     r#"{"severity":"alert","message":"An incident","data":{"hello":"I am a mine turtle"}}"#
//! );
//! ```

use std::fmt;
use std::io;

use serde::ser::{Error as _, SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};

use crate::encoding::base64_encode;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncidentSeverity {
    Info,
    Warning,
    Error,
    Alert,
}

impl IncidentSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentSeverity::Info => "info",
            IncidentSeverity::Warning => "warning",
            IncidentSeverity::Error => "error",
            IncidentSeverity::Alert => "alert",
        }
    }
}

impl fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IncidentSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Compact JSON, except that integral floats below 1e21 are written in full
/// with one fractional digit (`1e16` becomes `10000000000000000.0`).
struct FractionalFormatter;

impl Formatter for FractionalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
            write!(writer, "{value:.1}")
        } else {
            CompactFormatter.write_f64(writer, value)
        }
    }
}

fn to_wire_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, FractionalFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(out).map_err(serde_json::Error::custom)
}

/// A single reported finding.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub severity: IncidentSeverity,
    pub message: String,
    /// Omitted from the wire form when empty.
    pub address: String,
    /// Omitted from the wire form when empty.
    pub tx_hash: String,
    pub data: Option<IncidentData>,
}

/// Attached incident data: either a structured tree or an opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub enum IncidentData {
    Struct(IncidentDataStruct),
    Bytes(Vec<u8>),
}

impl Incident {
    pub fn new(severity: IncidentSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            address: String::new(),
            tx_hash: String::new(),
            data: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = tx_hash.into();
        self
    }

    pub fn with_data(mut self, data: IncidentDataStruct) -> Self {
        self.data = Some(IncidentData::Struct(data));
        self
    }

    /// Attach an opaque payload, rendered as base64.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.data = Some(IncidentData::Bytes(payload.into()));
        self
    }

    /// Serialize to the host wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_wire_json(self)
    }
}

impl Serialize for Incident {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("severity", &self.severity)?;
        map.serialize_entry("message", &self.message)?;

        if !self.address.is_empty() {
            map.serialize_entry("address", &self.address)?;
        }

        if !self.tx_hash.is_empty() {
            map.serialize_entry("tx_hash", &self.tx_hash)?;
        }

        match &self.data {
            Some(IncidentData::Struct(data)) => map.serialize_entry("data", data)?,
            Some(IncidentData::Bytes(bytes)) => map.serialize_entry("data", &base64_encode(bytes))?,
            None => {}
        }

        map.end()
    }
}

/// A struct of uniquely named fields, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentDataStruct {
    fields: Vec<(String, IncidentDataValue)>,
}

impl IncidentDataStruct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_null(&mut self, name: impl Into<String>) -> bool {
        self.add_field(name, IncidentDataValue::Null)
    }

    pub fn add_number(&mut self, name: impl Into<String>, value: f64) -> bool {
        self.add_field(name, IncidentDataValue::Number(value))
    }

    pub fn add_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.add_field(name, IncidentDataValue::String(value.into()))
    }

    pub fn add_boolean(&mut self, name: impl Into<String>, value: bool) -> bool {
        self.add_field(name, IncidentDataValue::Boolean(value))
    }

    pub fn add_struct(&mut self, name: impl Into<String>, value: IncidentDataStruct) -> bool {
        self.add_field(name, IncidentDataValue::Struct(value))
    }

    pub fn add_list(&mut self, name: impl Into<String>, values: Vec<IncidentDataValue>) -> bool {
        self.add_field(name, IncidentDataValue::List(values))
    }

    /// Add a field. Returns `false`, leaving the struct unchanged, if the name is taken.
    pub fn add_field(&mut self, name: impl Into<String>, value: IncidentDataValue) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }

        self.fields.push((name, value));
        true
    }

    pub fn get(&self, name: &str) -> Option<&IncidentDataValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_wire_json(self)
    }
}

impl Serialize for IncidentDataStruct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncidentDataValue {
    Null,
    Number(f64),
    String(String),
    Boolean(bool),
    Struct(IncidentDataStruct),
    List(Vec<IncidentDataValue>),
}

impl Serialize for IncidentDataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IncidentDataValue::Null => serializer.serialize_unit(),
            IncidentDataValue::Number(v) => serializer.serialize_f64(*v),
            IncidentDataValue::String(v) => serializer.serialize_str(v),
            IncidentDataValue::Boolean(v) => serializer.serialize_bool(*v),
            IncidentDataValue::Struct(v) => v.serialize(serializer),
            IncidentDataValue::List(v) => serializer.collect_seq(v),
        }
    }
}

impl From<&str> for IncidentDataValue {
    fn from(value: &str) -> Self {
        IncidentDataValue::String(value.to_string())
    }
}

impl From<f64> for IncidentDataValue {
    fn from(value: f64) -> Self {
        IncidentDataValue::Number(value)
    }
}

impl From<bool> for IncidentDataValue {
    fn from(value: bool) -> Self {
        IncidentDataValue::Boolean(value)
    }
}

impl From<IncidentDataStruct> for IncidentDataValue {
    fn from(value: IncidentDataStruct) -> Self {
        IncidentDataValue::Struct(value)
    }
}
