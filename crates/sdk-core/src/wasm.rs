//! Host imports for guests compiled to `wasm32`.
//!
//! Calls shared by every chain live in the `daemon` import module. Strings go
//! out as `(ptr, len)` pairs; strings coming back are packed [`Handle`]s into
//! the guest's own linear memory. Chain crates add their collection imports and
//! combine both into a [`Host`](crate::host::Host) implementation.

use crate::errors::HostError;
use crate::host::{memory_range, Handle};

const WASM_PAGE_SIZE: usize = 65_536;

mod ffi {
    #[link(wasm_import_module = "daemon")]
    extern "C" {
        pub fn report(ptr: *const u8, len: u32);
        pub fn parameter(ptr: *const u8, len: u32) -> u64;
        pub fn http(ptr: *const u8, len: u32) -> u64;
        pub fn query(ptr: *const u8, len: u32) -> u64;
    }
}

/// Size of linear memory 0 in bytes.
fn memory_size() -> usize {
    core::arch::wasm32::memory_size(0) * WASM_PAGE_SIZE
}

/// Copy `length` bytes at `offset` out of linear memory.
pub fn read_memory(offset: u32, length: u32) -> Result<Vec<u8>, HostError> {
    let range = memory_range(offset, length, memory_size())?;
    if range.is_empty() {
        return Ok(Vec::new());
    }

    // SAFETY: the range is non-empty, starts above address 0 and lies within the
    // current memory size; the host does not mutate guest memory while the guest runs.
    let bytes = unsafe { core::slice::from_raw_parts(range.start as *const u8, range.len()) };

    Ok(bytes.to_vec())
}

fn read_string(handle: Handle) -> Option<String> {
    let bytes = read_memory(handle.offset(), handle.len()).ok()?;
    String::from_utf8(bytes).ok()
}

pub fn emit_incident(incident: &str) {
    // SAFETY: the pointer and length describe a live `&str`.
    unsafe { ffi::report(incident.as_ptr(), incident.len() as u32) }
}

/// `None` when the host has no parameter under `key`.
pub fn parameter(key: &str) -> Option<String> {
    // SAFETY: the pointer and length describe a live `&str`.
    let handle = Handle::from_raw(unsafe { ffi::parameter(key.as_ptr(), key.len() as u32) });
    if handle.is_null() {
        return None;
    }
    read_string(handle)
}

pub fn http(request: &str) -> String {
    // SAFETY: the pointer and length describe a live `&str`.
    let handle = Handle::from_raw(unsafe { ffi::http(request.as_ptr(), request.len() as u32) });
    read_string(handle).unwrap_or_default()
}

pub fn query(query: &str) -> String {
    // SAFETY: the pointer and length describe a live `&str`.
    let handle = Handle::from_raw(unsafe { ffi::query(query.as_ptr(), query.len() as u32) });
    read_string(handle).unwrap_or_default()
}
