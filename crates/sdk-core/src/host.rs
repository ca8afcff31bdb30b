//! The host capability boundary.
//!
//! Everything the guest needs from its host is expressed by the [`Host`] trait:
//! buffer handles for entity collections and argument values, raw memory reads,
//! and the outbound calls (incidents, parameters, HTTP, queries). Contexts take a
//! `Host` at construction, so tests can inject a double instead of wasm imports.

use std::fmt;
use std::ops::Range;

use crate::errors::HostError;

/// A packed `(offset, length)` pair identifying a buffer in host-addressable memory.
///
/// The offset lives in the upper 32 bits, the length in the lower 32 bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Handle(u64);

impl Handle {
    /// The "no data" handle.
    pub const NULL: Handle = Handle(0);

    pub fn pack(offset: u32, length: u32) -> Self {
        Self(((offset as u64) << 32) | (length as u64))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn offset(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn len(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn unpack(self) -> (u32, u32) {
        (self.offset(), self.len())
    }
}

/// Validate a memory read against a memory of `memory_size` bytes.
///
/// Offset 0 is the null address, so only an empty read may start there.
pub fn memory_range(offset: u32, length: u32, memory_size: usize) -> Result<Range<usize>, HostError> {
    let start = offset as usize;
    let end = start + length as usize;

    if end > memory_size || (offset == 0 && length > 0) {
        return Err(HostError::OutOfBounds {
            offset,
            length,
            memory_size,
        });
    }

    Ok(start..end)
}

/// Entity collections a host can hand out.
///
/// Not every chain provides every kind: EVM has no call trace arguments and
/// Sui has no blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    Blocks,
    Transactions,
    Events,
    CallTraces,
    CallTraceArgs,
    CallTraceTypeArgs,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 6] = [
        CollectionKind::Blocks,
        CollectionKind::Transactions,
        CollectionKind::Events,
        CollectionKind::CallTraces,
        CollectionKind::CallTraceArgs,
        CollectionKind::CallTraceTypeArgs,
    ];

    /// Name of the host import serving this collection.
    pub fn import_name(self) -> &'static str {
        match self {
            CollectionKind::Blocks => "get_blocks",
            CollectionKind::Transactions => "get_transactions",
            CollectionKind::Events => "get_events",
            CollectionKind::CallTraces => "get_call_traces",
            CollectionKind::CallTraceArgs => "get_call_trace_args",
            CollectionKind::CallTraceTypeArgs => "get_call_trace_type_args",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            CollectionKind::Blocks => 0,
            CollectionKind::Transactions => 1,
            CollectionKind::Events => 2,
            CollectionKind::CallTraces => 3,
            CollectionKind::CallTraceArgs => 4,
            CollectionKind::CallTraceTypeArgs => 5,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::Blocks => "blocks",
            CollectionKind::Transactions => "transactions",
            CollectionKind::Events => "events",
            CollectionKind::CallTraces => "call traces",
            CollectionKind::CallTraceArgs => "call trace args",
            CollectionKind::CallTraceTypeArgs => "call trace type args",
        };
        f.write_str(name)
    }
}

/// Capabilities provided by the host process.
///
/// Calls are synchronous and never retried. Handles returned by the fetch
/// methods are resolved through [`Host::read_memory`].
pub trait Host {
    /// Handle to a MessagePack array of entities of the given kind.
    fn fetch_collection(&self, kind: CollectionKind) -> Handle;

    /// Handle to a single encoded value tree for a call trace argument.
    fn fetch_argument_value(&self, id: u64) -> Handle;

    /// Decode base64 input bytes against an ABI signature.
    ///
    /// Returns [`Handle::NULL`] when the input does not match the signature.
    fn parse_input(&self, abi: &str, base64_data: &str) -> Handle;

    /// Copy `length` bytes starting at `offset` out of host-addressable memory.
    fn read_memory(&self, offset: u32, length: u32) -> Result<Vec<u8>, HostError>;

    /// Hand a fully serialized incident to the host.
    fn emit_incident(&self, incident: &str);

    /// Look up a daemon parameter by key.
    fn parameter(&self, key: &str) -> Option<String>;

    /// Execute a JSON-encoded HTTP request, returning the JSON-encoded response.
    fn http(&self, request: &str) -> String;

    /// Run a query against the host's view of the chain data, returning JSON rows.
    fn query(&self, query: &str) -> String;
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn fetch_collection(&self, kind: CollectionKind) -> Handle {
        (**self).fetch_collection(kind)
    }

    fn fetch_argument_value(&self, id: u64) -> Handle {
        (**self).fetch_argument_value(id)
    }

    fn parse_input(&self, abi: &str, base64_data: &str) -> Handle {
        (**self).parse_input(abi, base64_data)
    }

    fn read_memory(&self, offset: u32, length: u32) -> Result<Vec<u8>, HostError> {
        (**self).read_memory(offset, length)
    }

    fn emit_incident(&self, incident: &str) {
        (**self).emit_incident(incident)
    }

    fn parameter(&self, key: &str) -> Option<String> {
        (**self).parameter(key)
    }

    fn http(&self, request: &str) -> String {
        (**self).http(request)
    }

    fn query(&self, query: &str) -> String {
        (**self).query(query)
    }
}
