//! [`Host`] implementation over the `daemon_sui` and `daemon` import modules.

use daemon_sdk_core::{wasm, CollectionKind, Handle, Host, HostError};

mod ffi {
    #[link(wasm_import_module = "daemon_sui")]
    extern "C" {
        pub fn get_transactions() -> u64;
        pub fn get_events() -> u64;
        pub fn get_call_traces() -> u64;
        pub fn get_call_trace_type_args() -> u64;
        pub fn get_call_trace_args() -> u64;
        pub fn get_call_trace_arg_by_id(id: u64) -> u64;
    }
}

/// The host a compiled Sui daemon runs under.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuiWasmHost;

impl Host for SuiWasmHost {
    fn fetch_collection(&self, kind: CollectionKind) -> Handle {
        // SAFETY: the imports take no arguments and return a packed handle.
        let raw = unsafe {
            match kind {
                CollectionKind::Transactions => ffi::get_transactions(),
                CollectionKind::Events => ffi::get_events(),
                CollectionKind::CallTraces => ffi::get_call_traces(),
                CollectionKind::CallTraceTypeArgs => ffi::get_call_trace_type_args(),
                CollectionKind::CallTraceArgs => ffi::get_call_trace_args(),
                CollectionKind::Blocks => 0,
            }
        };
        Handle::from_raw(raw)
    }

    fn fetch_argument_value(&self, id: u64) -> Handle {
        // SAFETY: plain integer in, packed handle out.
        Handle::from_raw(unsafe { ffi::get_call_trace_arg_by_id(id) })
    }

    fn parse_input(&self, _abi: &str, _base64_data: &str) -> Handle {
        Handle::NULL
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
