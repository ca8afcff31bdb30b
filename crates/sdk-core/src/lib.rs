//! Chain-agnostic building blocks for daemon guests.
//!
//! A daemon runs once per block or transaction batch inside a host process. The
//! host owns the chain data; this crate moves it across the boundary and back:
//!
//! - [`host`]: the [`Host`] capability trait and packed [`Handle`]s
//! - [`bridge`]: [`HostBridge`], which fetches, decodes and counts host traffic
//! - [`codec`]: the MessagePack [`Decoder`] and the [`Decode`] record trait
//! - [`value`] and [`bigint`]: tagged value trees and 256-bit integers
//! - [`lazy`]: load-once collections and per-entity memo cells for contexts
//! - [`move_trace`]: Move call traces and argument views for Sui and Aptos
//! - [`incident`], [`http`], [`parameter`]: outbound reports and requests
//!
//! Chain crates build their entity records and contexts on top of these.

pub mod bigint;
pub mod bridge;
pub mod codec;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod host;
pub mod http;
pub mod incident;
pub mod lazy;
pub mod metrics;
pub mod move_trace;
pub mod parameter;
pub mod value;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types at crate root
pub use bigint::{hex_to_u256, I256, U256};
pub use bridge::{HostBridge, QueryRow};
pub use codec::{decode_collection, ByteBuffer, Decode, Decoder};
pub use config::SdkConfig;
pub use errors::{DecodeError, HostError, ValueError};
pub use host::{memory_range, CollectionKind, Handle, Host};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use incident::{Incident, IncidentData, IncidentDataStruct, IncidentDataValue, IncidentSeverity};
pub use lazy::{LazyCollection, Memo, Relation};
pub use metrics::{BridgeMetrics, MetricsSnapshot};
pub use parameter::Parameter;
pub use value::{StructValue, Value};
