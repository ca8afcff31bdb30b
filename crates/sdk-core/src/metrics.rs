//! Counters for host bridge traffic.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::host::CollectionKind;

/// Host bridge counters. Clones share the same underlying counters.
#[derive(Debug, Clone, Default)]
pub struct BridgeMetrics {
    /// Collection fetches, indexed by collection kind
    collection_fetches: Arc<[AtomicU64; 6]>,
    /// Lazy argument value fetches
    pub argument_fetches: Arc<AtomicU64>,
    /// Bytes copied out of host memory
    pub bytes_read: Arc<AtomicU64>,
    /// Incidents handed to the host
    pub incidents_reported: Arc<AtomicU64>,
    /// Parameter, HTTP and query calls
    pub outbound_calls: Arc<AtomicU64>,
}

impl BridgeMetrics {
    pub fn record_collection_fetch(&self, kind: CollectionKind) {
        self.collection_fetches[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_argument_fetch(&self) {
        self.argument_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bytes_read(&self, bytes: usize) {
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_incident(&self) {
        self.incidents_reported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outbound_call(&self) {
        self.outbound_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of times `kind` was fetched from the host.
    pub fn collection_fetches(&self, kind: CollectionKind) -> u64 {
        self.collection_fetches[kind.index()].load(Ordering::Relaxed)
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            block_fetches: self.collection_fetches(CollectionKind::Blocks),
            transaction_fetches: self.collection_fetches(CollectionKind::Transactions),
            event_fetches: self.collection_fetches(CollectionKind::Events),
            call_trace_fetches: self.collection_fetches(CollectionKind::CallTraces),
            call_trace_arg_fetches: self.collection_fetches(CollectionKind::CallTraceArgs),
            call_trace_type_arg_fetches: self
                .collection_fetches(CollectionKind::CallTraceTypeArgs),
            argument_fetches: self.argument_fetches.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            incidents_reported: self.incidents_reported.load(Ordering::Relaxed),
            outbound_calls: self.outbound_calls.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        for counter in self.collection_fetches.iter() {
            counter.store(0, Ordering::Relaxed);
        }
        self.argument_fetches.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.incidents_reported.store(0, Ordering::Relaxed);
        self.outbound_calls.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of metrics (for reporting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub block_fetches: u64,
    pub transaction_fetches: u64,
    pub event_fetches: u64,
    pub call_trace_fetches: u64,
    pub call_trace_arg_fetches: u64,
    pub call_trace_type_arg_fetches: u64,
    pub argument_fetches: u64,
    pub bytes_read: u64,
    pub incidents_reported: u64,
    pub outbound_calls: u64,
}

impl MetricsSnapshot {
    /// Total collection fetches across all kinds.
    pub fn total_collection_fetches(&self) -> u64 {
        self.block_fetches
            + self.transaction_fetches
            + self.event_fetches
            + self.call_trace_fetches
            + self.call_trace_arg_fetches
            + self.call_trace_type_arg_fetches
    }

    /// Format a human-readable report.
    pub fn format_report(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Host Bridge Report".to_string());
        lines.push("=".repeat(40));
        lines.push("Collection Fetches:".to_string());
        lines.push(format!("  Blocks:          {}", self.block_fetches));
        lines.push(format!("  Transactions:    {}", self.transaction_fetches));
        lines.push(format!("  Events:          {}", self.event_fetches));
        lines.push(format!("  Call Traces:     {}", self.call_trace_fetches));
        lines.push(format!("  Trace Args:      {}", self.call_trace_arg_fetches));
        lines.push(format!("  Trace Type Args: {}", self.call_trace_type_arg_fetches));
        lines.push(String::new());
        lines.push(format!("Argument Values:   {}", self.argument_fetches));
        lines.push(format!("Bytes Read:        {}", self.bytes_read));
        lines.push(format!("Incidents:         {}", self.incidents_reported));
        lines.push(format!("Outbound Calls:    {}", self.outbound_calls));
        lines.join("\n")
    }
}
