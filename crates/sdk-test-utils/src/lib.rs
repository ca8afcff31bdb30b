//! Test support for daemon SDK crates.
//!
//! - [`MockHost`]: a [`Host`](daemon_sdk_core::Host) backed by simulated memory
//!   that counts fetches and records outbound calls
//! - [`MsgPackWriter`]: builds host-shaped MessagePack buffers

pub mod mock_host;
pub mod msgpack;

pub use mock_host::MockHost;
pub use msgpack::{collection, MsgPackWriter};
