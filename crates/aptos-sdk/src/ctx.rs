//! Per-invocation Aptos context.
//!
//! The block joins to its transactions by hash. Below a transaction, joins
//! follow `tx_seq` into the shared [`MoveTraceCache`], which joins on
//! `call_trace_seq` and fetches argument values per argument on first read.

use std::ops::Deref;

use anyhow::{anyhow, Result};
use daemon_sdk_core::lazy::matching_indices;
use daemon_sdk_core::move_trace::{
    CallTrace, CallTraceArg, CallTraceTypeArg, CallTraceView, MoveTraceCache, MoveTraces,
};
use daemon_sdk_core::{
    CollectionKind, Host, HostBridge, Incident, LazyCollection, Relation, SdkConfig,
};
use tracing::trace;

use crate::block::Block;
use crate::event::Event;
use crate::transaction::Transaction;

#[derive(Debug)]
pub struct AptosCtx {
    bridge: HostBridge,
    blocks: LazyCollection<Block>,
    transactions: LazyCollection<Transaction>,
    events: LazyCollection<Event>,
    move_traces: MoveTraceCache,
    block_transactions: Relation,
    transaction_events: Relation,
    transaction_call_traces: Relation,
}

impl AptosCtx {
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, SdkConfig::default())
    }

    pub fn with_config(host: impl Host + 'static, config: SdkConfig) -> Self {
        Self {
            bridge: HostBridge::with_config(host, config),
            blocks: LazyCollection::new(),
            transactions: LazyCollection::new(),
            events: LazyCollection::new(),
            move_traces: MoveTraceCache::new(),
            block_transactions: Relation::new(),
            transaction_events: Relation::new(),
            transaction_call_traces: Relation::new(),
        }
    }

    /// Context bound to the wasm host imports.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::new(crate::wasm::AptosWasmHost)
    }

    pub fn bridge(&self) -> &HostBridge {
        &self.bridge
    }

    pub fn report(&self, incident: &Incident) -> Result<()> {
        self.bridge.report(incident)
    }

    // -------------------------------------------------------------------------
    // Collections
    // -------------------------------------------------------------------------

    pub fn blocks(&self) -> Result<&[Block]> {
        self.blocks
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::Blocks))
    }

    pub fn transactions(&self) -> Result<&[Transaction]> {
        self.transactions
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::Transactions))
    }

    pub fn events(&self) -> Result<&[Event]> {
        self.events
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::Events))
    }

    /// Call traces with their argument joins and lazily fetched values.
    pub fn move_traces(&self) -> MoveTraces<'_> {
        self.move_traces.with_bridge(&self.bridge)
    }

    pub fn call_traces(&self) -> Result<&[CallTrace]> {
        self.move_traces().call_traces()
    }

    pub fn call_trace_type_args(&self) -> Result<&[CallTraceTypeArg]> {
        self.move_traces().type_args()
    }

    pub fn call_trace_args(&self) -> Result<&[CallTraceArg]> {
        self.move_traces().args()
    }

    /// The block under analysis: the first block the host provides.
    pub fn block(&self) -> Result<BlockView<'_>> {
        let blocks = self.blocks()?;
        let record = blocks.first().ok_or_else(|| anyhow!("host returned no blocks"))?;
        Ok(BlockView {
            ctx: self,
            index: 0,
            record,
        })
    }

    pub fn transaction_views(&self) -> Result<Vec<TransactionView<'_>>> {
        Ok(self
            .transactions()?
            .iter()
            .enumerate()
            .map(|(index, record)| TransactionView {
                ctx: self,
                index,
                record,
            })
            .collect())
    }

    pub fn call_trace_views(&self) -> Result<Vec<CallTraceView<'_>>> {
        self.move_traces().views()
    }

    // -------------------------------------------------------------------------
    // Joins
    // -------------------------------------------------------------------------

    fn block_transaction_indices(&self, index: usize) -> Result<&[usize]> {
        let blocks = self.blocks()?;
        let block = &blocks[index];
        let indices = self
            .block_transactions
            .get_or_try_init(blocks.len(), index, || {
                let txs = self.transactions()?;
                trace!(block_hash = %block.hash, "joining block transactions");
                Ok::<_, anyhow::Error>(matching_indices(txs, |tx| tx.block_hash == block.hash))
            })?;
        Ok(indices.as_slice())
    }

    fn transaction_event_indices(&self, index: usize) -> Result<&[usize]> {
        let txs = self.transactions()?;
        let tx = &txs[index];
        let indices = self.transaction_events.get_or_try_init(txs.len(), index, || {
            let events = self.events()?;
            trace!(tx_seq = tx.seq, "joining transaction events");
            Ok::<_, anyhow::Error>(matching_indices(events, |ev| ev.tx_seq == tx.seq))
        })?;
        Ok(indices.as_slice())
    }

    fn transaction_call_trace_indices(&self, index: usize) -> Result<&[usize]> {
        let txs = self.transactions()?;
        let tx = &txs[index];
        let indices = self
            .transaction_call_traces
            .get_or_try_init(txs.len(), index, || {
                let traces = self.call_traces()?;
                trace!(tx_seq = tx.seq, "joining transaction call traces");
                Ok::<_, anyhow::Error>(matching_indices(traces, |ct| ct.tx_seq == tx.seq))
            })?;
        Ok(indices.as_slice())
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct BlockView<'ctx> {
    ctx: &'ctx AptosCtx,
    index: usize,
    record: &'ctx Block,
}

impl<'ctx> BlockView<'ctx> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'ctx Block {
        self.record
    }

    /// Transactions committed in this block, in host order.
    pub fn transactions(&self) -> Result<Vec<TransactionView<'ctx>>> {
        let ctx = self.ctx;
        let txs = ctx.transactions()?;
        Ok(ctx
            .block_transaction_indices(self.index)?
            .iter()
            .map(|&index| TransactionView {
                ctx,
                index,
                record: &txs[index],
            })
            .collect())
    }
}

impl Deref for BlockView<'_> {
    type Target = Block;

    fn deref(&self) -> &Block {
        self.record
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TransactionView<'ctx> {
    ctx: &'ctx AptosCtx,
    index: usize,
    record: &'ctx Transaction,
}

impl<'ctx> TransactionView<'ctx> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'ctx Transaction {
        self.record
    }

    pub fn events(&self) -> Result<Vec<&'ctx Event>> {
        let ctx = self.ctx;
        let events = ctx.events()?;
        Ok(ctx
            .transaction_event_indices(self.index)?
            .iter()
            .map(|&index| &events[index])
            .collect())
    }

    pub fn call_traces(&self) -> Result<Vec<CallTraceView<'ctx>>> {
        let ctx = self.ctx;
        ctx.move_traces().views_at(ctx.transaction_call_trace_indices(self.index)?)
    }
}

impl Deref for TransactionView<'_> {
    type Target = Transaction;

    fn deref(&self) -> &Transaction {
        self.record
    }
}
