//! # Host Bridge
//!
//! [`HostBridge`] sits between a chain context and its [`Host`]. It turns
//! handles into owned buffers, decodes them, and performs the outbound calls.
//!
//! ## Flow
//!
//! ```text
//! Context ── fetch_collection(kind) ──► Host ──► Handle
//!    ▲                                             │
//!    └── Vec<T> ◄── decode_collection ◄── read_memory(offset, len)
//! ```
//!
//! Every call is synchronous and attempted once. Host and decode failures
//! are returned with context naming the operation and abort the invocation.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::codec::{decode_collection, ByteBuffer, Decode};
use crate::config::SdkConfig;
use crate::encoding::base64_encode;
use crate::errors::HostError;
use crate::host::{CollectionKind, Handle, Host};
use crate::http::{HttpRequest, HttpResponse};
use crate::incident::Incident;
use crate::metrics::BridgeMetrics;
use crate::parameter::Parameter;
use crate::value::Value;

pub type QueryRow = serde_json::Map<String, serde_json::Value>;

pub struct HostBridge {
    host: Box<dyn Host>,
    config: SdkConfig,
    metrics: BridgeMetrics,
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridge")
            .field("config", &self.config)
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

impl HostBridge {
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, SdkConfig::default())
    }

    pub fn with_config(host: impl Host + 'static, config: SdkConfig) -> Self {
        Self {
            host: Box::new(host),
            config,
            metrics: BridgeMetrics::default(),
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn metrics(&self) -> &BridgeMetrics {
        &self.metrics
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// Copy the bytes a handle points at out of host memory.
    pub fn read_buffer(&self, handle: Handle) -> Result<ByteBuffer, HostError> {
        let (offset, length) = handle.unpack();
        let bytes = self.host.read_memory(offset, length)?;
        self.metrics.record_bytes_read(bytes.len());
        Ok(ByteBuffer::new(bytes))
    }

    /// Fetch and decode one entity collection. A zero-length buffer is an empty collection.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_collection<T: Decode>(&self, kind: CollectionKind) -> Result<Vec<T>> {
        self.metrics.record_collection_fetch(kind);

        let handle = self.host.fetch_collection(kind);
        let buffer = self
            .read_buffer(handle)
            .with_context(|| format!("Failed to read {} buffer", kind))?;

        if buffer.is_empty() {
            debug!(%kind, "host returned an empty buffer");
            return Ok(Vec::new());
        }

        let records: Vec<T> = decode_collection(buffer.as_slice(), &self.config)
            .with_context(|| format!("Failed to decode {}", kind))?;

        debug!(%kind, bytes = buffer.len(), records = records.len(), "loaded collection");

        Ok(records)
    }

    /// Fetch and decode the value tree of one call trace argument.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_argument_value(&self, id: u64) -> Result<Value> {
        self.metrics.record_argument_fetch();

        let handle = self.host.fetch_argument_value(id);
        let buffer = self
            .read_buffer(handle)
            .with_context(|| format!("Failed to read value buffer for argument {}", id))?;

        Value::from_bytes(buffer.as_slice(), &self.config)
            .with_context(|| format!("Failed to decode value of argument {}", id))
    }

    /// Ask the host to decode `data` against `abi`.
    ///
    /// Returns `None` when the host reports no match.
    #[instrument(level = "debug", skip(self, data), fields(len = data.len()))]
    pub fn parse_input(&self, abi: &str, data: &[u8]) -> Result<Option<ByteBuffer>> {
        let handle = self.host.parse_input(abi, &base64_encode(data));
        if handle.is_null() {
            debug!("input does not match signature");
            return Ok(None);
        }

        self.read_buffer(handle)
            .map(Some)
            .with_context(|| format!("Failed to read parsed input for '{}'", abi))
    }

    /// Serialize an incident and hand it to the host.
    #[instrument(level = "debug", skip_all, fields(severity = %incident.severity))]
    pub fn report(&self, incident: &Incident) -> Result<()> {
        let json = incident.to_json().context("Failed to serialize incident")?;
        self.host.emit_incident(&json);
        self.metrics.record_incident();
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn parameter(&self, key: &str) -> Result<Parameter> {
        self.metrics.record_outbound_call();

        let value = self
            .host
            .parameter(key)
            .ok_or_else(|| HostError::MissingParameter(key.to_string()))?;

        Ok(Parameter::new(key, value))
    }

    #[instrument(level = "debug", skip_all, fields(method = request.method.as_str(), url = %request.url))]
    pub fn http(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.metrics.record_outbound_call();

        let payload = request.to_json().context("Failed to serialize HTTP request")?;
        let response = self.host.http(&payload);
        HttpResponse::from_json(&response)
    }

    /// Run a query on the host and return its rows as JSON objects.
    #[instrument(level = "debug", skip(self))]
    pub fn query(&self, query: &str) -> Result<Vec<QueryRow>> {
        self.metrics.record_outbound_call();

        let rows = self.host.query(query);
        serde_json::from_str(&rows).context("Failed to parse query result rows")
    }
}
