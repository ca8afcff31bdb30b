//! Aptos support for daemon guests.
//!
//! [`AptosCtx`] exposes the block under analysis, its transactions, their
//! events and Move call traces. Call trace argument values are generic
//! [`Value`] trees fetched from the host on first read.
//!
//! ```ignore
//! let ctx = AptosCtx::load();
//! for tx in ctx.block()?.transactions()? {
//!     if !tx.is_success() {
//!         continue;
//!     }
//!     for ct in tx.call_traces()? {
//!         // ...
//!     }
//! }
//! ```
//!
//! [`Value`]: daemon_sdk_core::Value

pub mod block;
pub mod ctx;
pub mod event;
pub mod transaction;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use block::Block;
pub use ctx::{AptosCtx, BlockView, TransactionView};
pub use daemon_sdk_core::move_trace::{
    CallTrace, CallTraceArg, CallTraceArgView, CallTraceTypeArg, CallTraceView,
};
pub use event::Event;
pub use transaction::Transaction;
