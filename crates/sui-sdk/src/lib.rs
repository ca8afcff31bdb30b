//! Sui support for daemon guests.
//!
//! [`SuiCtx`] exposes the transaction under analysis along with its events and
//! Move call traces. Call trace arguments carry generic [`Value`] trees that are
//! fetched from the host only when read.
//!
//! ```ignore
//! let ctx = SuiCtx::load();
//! for ct in ctx.tx()?.call_traces()? {
//!     if ct.function == "swap" {
//!         let amount = ct.args()?[1].value()?.as_u64()?;
//!         // ...
//!     }
//! }
//! ```
//!
//! [`Value`]: daemon_sdk_core::Value

pub mod ctx;
pub mod event;
pub mod transaction;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use ctx::{SuiCtx, TransactionView};
pub use daemon_sdk_core::move_trace::{
    CallTrace, CallTraceArg, CallTraceArgView, CallTraceTypeArg, CallTraceView,
};
pub use event::Event;
pub use transaction::Transaction;
