//! [`Host`] implementation over the `daemon_evm` and `daemon` import modules.

use daemon_sdk_core::{wasm, CollectionKind, Handle, Host, HostError};

mod ffi {
    #[link(wasm_import_module = "daemon_evm")]
    extern "C" {
        pub fn get_blocks() -> u64;
        pub fn get_transactions() -> u64;
        pub fn get_call_traces() -> u64;
        pub fn get_events() -> u64;
        pub fn parse_tx_input(abi_ptr: *const u8, abi_len: u32, data_ptr: *const u8, data_len: u32) -> u64;
    }
}

/// The host a compiled EVM daemon runs under.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvmWasmHost;

impl Host for EvmWasmHost {
    fn fetch_collection(&self, kind: CollectionKind) -> Handle {
        // SAFETY: the imports take no arguments and return a packed handle.
        let raw = unsafe {
            match kind {
                CollectionKind::Blocks => ffi::get_blocks(),
                CollectionKind::Transactions => ffi::get_transactions(),
                CollectionKind::CallTraces => ffi::get_call_traces(),
                CollectionKind::Events => ffi::get_events(),
                CollectionKind::CallTraceArgs | CollectionKind::CallTraceTypeArgs => 0,
            }
        };
        Handle::from_raw(raw)
    }

    fn fetch_argument_value(&self, _id: u64) -> Handle {
        Handle::NULL
    }

    fn parse_input(&self, abi: &str, base64_data: &str) -> Handle {
        // SAFETY: both pointer and length pairs describe live `&str`s.
        let raw = unsafe {
            ffi::parse_tx_input(
                abi.as_ptr(),
                abi.len() as u32,
                base64_data.as_ptr(),
                base64_data.len() as u32,
            )
        };
        Handle::from_raw(raw)
    }

    fn read_memory(&self, offset: u32, length: u32) -> Result<Vec<u8>, HostError> {
        wasm::read_memory(offset, length)
    }

    fn emit_incident(&self, incident: &str) {
        wasm::emit_incident(incident)
    }

    fn parameter(&self, key: &str) -> Option<String> {
        wasm::parameter(key)
    }

    fn http(&self, request: &str) -> String {
        wasm::http(request)
    }

    fn query(&self, query: &str) -> String {
        wasm::query(query)
    }
}
