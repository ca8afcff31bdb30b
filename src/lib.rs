//! Daemon SDK
//!
//! Guest-side building blocks for analysis daemons running inside a host
//! sandbox:
//!
//! - **Host bridge**: packed buffer handles, memory reads and outbound calls
//!   behind the [`Host`] trait
//! - **Decoding**: a MessagePack cursor, entity collections and tagged value
//!   trees
//! - **Contexts**: per-chain entity caches with lazy joins
//!   ([`evm::EvmCtx`], [`sui::SuiCtx`], [`aptos::AptosCtx`])
//! - **Reporting**: incidents with structured data or raw payloads
//!
//! Each chain is behind a cargo feature of the same name; all are on by default.
//!
//! ```ignore
//! use daemon_sdk::prelude::*;
//! use daemon_sdk::evm::EvmCtx;
//!
//! let ctx = EvmCtx::load();
//! let threshold = ctx.bridge().parameter("threshold")?.as_number().unwrap_or(1e18);
//! for tx in ctx.block()?.transactions()? {
//!     if tx.value as f64 > threshold {
//!         let incident = Incident::new(IncidentSeverity::Warning, "large transfer")
//!             .with_tx_hash(tx.tx_hash.clone());
//!         ctx.report(&incident)?;
//!     }
//! }
//! ```

pub use daemon_sdk_core::*;

#[cfg(feature = "evm")]
pub use daemon_evm_sdk as evm;

#[cfg(feature = "sui")]
pub use daemon_sui_sdk as sui;

#[cfg(feature = "aptos")]
pub use daemon_aptos_sdk as aptos;

/// The types most daemons touch.
pub mod prelude {
    pub use daemon_sdk_core::{
        HttpMethod, HttpRequest, HttpResponse, Incident, IncidentDataStruct, IncidentDataValue,
        IncidentSeverity, Parameter, SdkConfig, Value,
    };

    #[cfg(feature = "aptos")]
    pub use daemon_aptos_sdk::AptosCtx;
    #[cfg(feature = "evm")]
    pub use daemon_evm_sdk::{EvmCtx, EvmValue};
    #[cfg(feature = "sui")]
    pub use daemon_sui_sdk::SuiCtx;
}
