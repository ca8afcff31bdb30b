//! EVM support for daemon guests.
//!
//! [`EvmCtx`] loads blocks, transactions, call traces and events from the host
//! on first use and joins them on demand. Transaction calldata can be decoded
//! against an ABI signature through [`TxInput::parse`], yielding [`EvmValue`]s.
//!
//! ```ignore
//! let ctx = EvmCtx::load();
//! for tx in ctx.block()?.transactions()? {
//!     if let Some(args) = tx.input().parse("function transfer(address,uint256)")? {
//!         let amount = args[1].as_uint()?;
//!         // ...
//!     }
//! }
//! ```

pub mod block;
pub mod call_trace;
pub mod ctx;
pub mod event;
pub mod transaction;
pub mod tx_input;
pub mod value;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use block::Block;
pub use call_trace::CallTrace;
pub use ctx::{BlockView, EvmCtx, TransactionView};
pub use event::Event;
pub use transaction::Transaction;
pub use tx_input::TxInput;
pub use value::EvmValue;
