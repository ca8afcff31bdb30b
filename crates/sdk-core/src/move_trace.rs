//! Move call traces, shared by the Move-based chains.
//!
//! ```text
//! CallTraceView ──args()──────► CallTraceArgView ──value()──► &Value
//!               └─type_args()─► &CallTraceTypeArg
//! ```
//!
//! A chain context owns one [`MoveTraceCache`] and joins its own transactions
//! onto it by `tx_seq`. Argument values are not part of the collections: each
//! one is fetched by argument `seq` on first read and kept for the invocation.

use std::ops::Deref;

use anyhow::Result;
use tracing::trace;

use crate::bridge::HostBridge;
use crate::codec::{Decode, Decoder};
use crate::errors::DecodeError;
use crate::host::CollectionKind;
use crate::lazy::{matching_indices, LazyCollection, Memo, Relation};
use crate::value::Value;

// =============================================================================
// Records
// =============================================================================

/// One Move function call made while executing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTrace {
    pub seq: u64,
    pub tx_seq: u64,
    pub depth: u32,
    pub call_type: u8,
    pub gas_used: u64,
    /// `None` for calls into natives, and for Aptos scripts.
    pub transaction_module: Option<String>,
    pub function: String,
}

impl Decode for CallTrace {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u64()?,
            tx_seq: decoder.read_u64()?,
            depth: decoder.read_u32()?,
            call_type: decoder.read_u8()?,
            gas_used: decoder.read_u64()?,
            transaction_module: decoder.read_optional(|d| d.read_string())?,
            function: decoder.read_string()?,
        })
    }
}

/// A type argument of a call, e.g. `0x2::sui::SUI`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTraceTypeArg {
    pub seq: u64,
    pub call_trace_seq: u64,
    pub arg: String,
}

impl Decode for CallTraceTypeArg {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u64()?,
            call_trace_seq: decoder.read_u64()?,
            arg: decoder.read_string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallTraceArg {
    pub seq: u64,
    pub call_trace_seq: u64,
}

impl Decode for CallTraceArg {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seq: decoder.read_u64()?,
            call_trace_seq: decoder.read_u64()?,
        })
    }
}

// =============================================================================
// Cache
// =============================================================================

/// Call trace collections, their argument joins and fetched argument values.
#[derive(Debug, Default)]
pub struct MoveTraceCache {
    call_traces: LazyCollection<CallTrace>,
    type_args: LazyCollection<CallTraceTypeArg>,
    args: LazyCollection<CallTraceArg>,
    type_arg_links: Relation,
    arg_links: Relation,
    arg_values: Memo<Value>,
}

impl MoveTraceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the cache to the bridge that feeds it.
    pub fn with_bridge<'ctx>(&'ctx self, bridge: &'ctx HostBridge) -> MoveTraces<'ctx> {
        MoveTraces {
            bridge,
            cache: self,
        }
    }
}

/// A [`MoveTraceCache`] paired with its [`HostBridge`].
#[derive(Debug, Clone, Copy)]
pub struct MoveTraces<'ctx> {
    bridge: &'ctx HostBridge,
    cache: &'ctx MoveTraceCache,
}

impl<'ctx> MoveTraces<'ctx> {
    pub fn call_traces(self) -> Result<&'ctx [CallTrace]> {
        self.cache
            .call_traces
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::CallTraces))
    }

    pub fn type_args(self) -> Result<&'ctx [CallTraceTypeArg]> {
        self.cache
            .type_args
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::CallTraceTypeArgs))
    }

    pub fn args(self) -> Result<&'ctx [CallTraceArg]> {
        self.cache
            .args
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::CallTraceArgs))
    }

    pub fn views(self) -> Result<Vec<CallTraceView<'ctx>>> {
        Ok(self
            .call_traces()?
            .iter()
            .enumerate()
            .map(|(index, record)| CallTraceView {
                traces: self,
                index,
                record,
            })
            .collect())
    }

    /// Views of the call traces at `indices`, e.g. the result of a transaction join.
    pub fn views_at(self, indices: &[usize]) -> Result<Vec<CallTraceView<'ctx>>> {
        let traces = self.call_traces()?;
        Ok(indices
            .iter()
            .map(|&index| CallTraceView {
                traces: self,
                index,
                record: &traces[index],
            })
            .collect())
    }

    fn type_arg_indices(self, index: usize) -> Result<&'ctx [usize]> {
        let traces = self.call_traces()?;
        let ct = &traces[index];
        let indices = self
            .cache
            .type_arg_links
            .get_or_try_init(traces.len(), index, || {
                let type_args = self.type_args()?;
                trace!(call_trace_seq = ct.seq, "joining call trace type args");
                Ok::<_, anyhow::Error>(matching_indices(type_args, |arg| {
                    arg.call_trace_seq == ct.seq
                }))
            })?;
        Ok(indices.as_slice())
    }

    fn arg_indices(self, index: usize) -> Result<&'ctx [usize]> {
        let traces = self.call_traces()?;
        let ct = &traces[index];
        let indices = self
            .cache
            .arg_links
            .get_or_try_init(traces.len(), index, || {
                let args = self.args()?;
                trace!(call_trace_seq = ct.seq, "joining call trace args");
                Ok::<_, anyhow::Error>(matching_indices(args, |arg| arg.call_trace_seq == ct.seq))
            })?;
        Ok(indices.as_slice())
    }

    fn arg_value(self, index: usize) -> Result<&'ctx Value> {
        let args = self.args()?;
        let arg = &args[index];
        self.cache
            .arg_values
            .get_or_try_init(args.len(), index, || self.bridge.fetch_argument_value(arg.seq))
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct CallTraceView<'ctx> {
    traces: MoveTraces<'ctx>,
    index: usize,
    record: &'ctx CallTrace,
}

impl<'ctx> CallTraceView<'ctx> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'ctx CallTrace {
        self.record
    }

    pub fn type_args(&self) -> Result<Vec<&'ctx CallTraceTypeArg>> {
        let type_args = self.traces.type_args()?;
        Ok(self
            .traces
            .type_arg_indices(self.index)?
            .iter()
            .map(|&index| &type_args[index])
            .collect())
    }

    pub fn args(&self) -> Result<Vec<CallTraceArgView<'ctx>>> {
        let traces = self.traces;
        let args = traces.args()?;
        Ok(traces
            .arg_indices(self.index)?
            .iter()
            .map(|&index| CallTraceArgView {
                traces,
                index,
                record: &args[index],
            })
            .collect())
    }
}

impl Deref for CallTraceView<'_> {
    type Target = CallTrace;

    fn deref(&self) -> &CallTrace {
        self.record
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CallTraceArgView<'ctx> {
    traces: MoveTraces<'ctx>,
    index: usize,
    record: &'ctx CallTraceArg,
}

impl<'ctx> CallTraceArgView<'ctx> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'ctx CallTraceArg {
        self.record
    }

    /// The argument's value, fetched from the host on first call.
    pub fn value(&self) -> Result<&'ctx Value> {
        self.traces.arg_value(self.index)
    }
}

impl Deref for CallTraceArgView<'_> {
    type Target = CallTraceArg;

    fn deref(&self) -> &CallTraceArg {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_collection;
    use crate::config::SdkConfig;
    use daemon_sdk_test_utils::collection;

    #[test]
    fn test_decode_call_traces_with_optional_module() {
        let modules = [Some("pool"), None];
        let bytes = collection(&modules, 7, |w, module| {
            w.uint(10)
                .uint(1)
                .uint(2)
                .uint(0)
                .uint(1_500)
                .opt_str(*module)
                .str("swap");
        });

        let traces: Vec<CallTrace> = decode_collection(&bytes, &SdkConfig::default()).unwrap();
        assert_eq!(traces[0].transaction_module.as_deref(), Some("pool"));
        assert_eq!(traces[1].transaction_module, None);
        assert_eq!(traces[1].function, "swap");
        assert_eq!(traces[1].depth, 2);
    }

    #[test]
    fn test_call_type_out_of_range() {
        let bytes = collection(&[()], 7, |w, _| {
            w.uint(0).uint(0).uint(0).uint(300).uint(0).nil().str("f");
        });

        let err = decode_collection::<CallTrace>(&bytes, &SdkConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }));
    }

    #[test]
    fn test_decode_args() {
        let bytes = collection(&[(0u64, 10u64), (1, 10)], 3, |w, (seq, ct)| {
            w.uint(*seq).uint(*ct).str("0x1::aptos_coin::AptosCoin");
        });
        let type_args: Vec<CallTraceTypeArg> =
            decode_collection(&bytes, &SdkConfig::default()).unwrap();
        assert_eq!(type_args[1].seq, 1);
        assert_eq!(type_args[1].arg, "0x1::aptos_coin::AptosCoin");

        let bytes = collection(&[(7u64, 10u64)], 2, |w, (seq, ct)| {
            w.uint(*seq).uint(*ct);
        });
        let args: Vec<CallTraceArg> = decode_collection(&bytes, &SdkConfig::default()).unwrap();
        assert_eq!(
            args,
            vec![CallTraceArg {
                seq: 7,
                call_trace_seq: 10
            }]
        );
    }
}
