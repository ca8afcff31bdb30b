//! In-process [`Host`] double.
//!
//! Buffers live in a simulated linear memory and are addressed by real packed
//! handles, so the full read path runs in tests. Every call is counted and every
//! outbound payload is recorded. Clones share state, which lets a test keep a
//! handle on the host after moving a clone into a context.

use std::collections::HashMap;
use std::sync::Arc;

use daemon_sdk_core::{memory_range, CollectionKind, Handle, Host, HostError};
use parking_lot::Mutex;

/// Bytes reserved at the start of memory so that no stored buffer sits at offset 0.
const RESERVED: usize = 16;

#[derive(Debug, Default)]
struct MockState {
    memory: Vec<u8>,
    collections: HashMap<CollectionKind, Handle>,
    argument_values: HashMap<u64, Handle>,
    parsed_inputs: HashMap<String, Handle>,
    parameters: HashMap<String, String>,
    http_response: Option<String>,
    query_results: HashMap<String, String>,

    collection_fetches: HashMap<CollectionKind, usize>,
    argument_fetches: HashMap<u64, usize>,
    parse_requests: Vec<(String, String)>,
    incidents: Vec<String>,
    http_requests: Vec<String>,
    queries: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MockHost {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        let state = MockState {
            memory: vec![0; RESERVED],
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy `bytes` into simulated memory and return a handle to them.
    pub fn store(&self, bytes: &[u8]) -> Handle {
        let mut state = self.state.lock();
        let offset = state.memory.len() as u32;
        state.memory.extend_from_slice(bytes);
        Handle::pack(offset, bytes.len() as u32)
    }

    // ---------------------------------------------------------------------
    // Builders
    // ---------------------------------------------------------------------

    pub fn with_collection(self, kind: CollectionKind, bytes: &[u8]) -> Self {
        let handle = self.store(bytes);
        self.state.lock().collections.insert(kind, handle);
        self
    }

    /// Serve a raw handle for `kind`, e.g. one pointing outside memory.
    pub fn with_collection_handle(self, kind: CollectionKind, handle: Handle) -> Self {
        self.state.lock().collections.insert(kind, handle);
        self
    }

    pub fn with_argument_value(self, id: u64, bytes: &[u8]) -> Self {
        let handle = self.store(bytes);
        self.state.lock().argument_values.insert(id, handle);
        self
    }

    /// Answer `parse_input` calls for `abi` with `bytes`. Other signatures get no match.
    pub fn with_parsed_input(self, abi: &str, bytes: &[u8]) -> Self {
        let handle = self.store(bytes);
        self.state.lock().parsed_inputs.insert(abi.to_string(), handle);
        self
    }

    pub fn with_parameter(self, key: &str, value: &str) -> Self {
        self.state
            .lock()
            .parameters
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_http_response(self, response: &str) -> Self {
        self.state.lock().http_response = Some(response.to_string());
        self
    }

    pub fn with_query_result(self, query: &str, rows: &str) -> Self {
        self.state
            .lock()
            .query_results
            .insert(query.to_string(), rows.to_string());
        self
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    pub fn collection_fetches(&self, kind: CollectionKind) -> usize {
        self.state
            .lock()
            .collection_fetches
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    pub fn argument_fetches(&self, id: u64) -> usize {
        self.state
            .lock()
            .argument_fetches
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    /// `(abi, base64 input)` pairs passed to `parse_input`.
    pub fn parse_requests(&self) -> Vec<(String, String)> {
        self.state.lock().parse_requests.clone()
    }

    pub fn incidents(&self) -> Vec<String> {
        self.state.lock().incidents.clone()
    }

    pub fn http_requests(&self) -> Vec<String> {
        self.state.lock().http_requests.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }

    pub fn memory_size(&self) -> usize {
        self.state.lock().memory.len()
    }
}

impl Host for MockHost {
    fn fetch_collection(&self, kind: CollectionKind) -> Handle {
        let mut state = self.state.lock();
        *state.collection_fetches.entry(kind).or_default() += 1;
        state.collections.get(&kind).copied().unwrap_or(Handle::NULL)
    }

    fn fetch_argument_value(&self, id: u64) -> Handle {
        let mut state = self.state.lock();
        *state.argument_fetches.entry(id).or_default() += 1;
        state.argument_values.get(&id).copied().unwrap_or(Handle::NULL)
    }

    fn parse_input(&self, abi: &str, base64_data: &str) -> Handle {
        let mut state = self.state.lock();
        state
            .parse_requests
            .push((abi.to_string(), base64_data.to_string()));
        state.parsed_inputs.get(abi).copied().unwrap_or(Handle::NULL)
    }

    fn read_memory(&self, offset: u32, length: u32) -> Result<Vec<u8>, HostError> {
        let state = self.state.lock();
        let range = memory_range(offset, length, state.memory.len())?;
        Ok(state.memory[range].to_vec())
    }

    fn emit_incident(&self, incident: &str) {
        self.state.lock().incidents.push(incident.to_string());
    }

    fn parameter(&self, key: &str) -> Option<String> {
        self.state.lock().parameters.get(key).cloned()
    }

    fn http(&self, request: &str) -> String {
        let mut state = self.state.lock();
        state.http_requests.push(request.to_string());
        state
            .http_response
            .clone()
            .unwrap_or_else(|| r#"{"status":404,"headers":{}}"#.to_string())
    }

    fn query(&self, query: &str) -> String {
        let mut state = self.state.lock();
        state.queries.push(query.to_string());
        state
            .query_results
            .get(query)
            .cloned()
            .unwrap_or_else(|| "[]".to_string())
    }
}
