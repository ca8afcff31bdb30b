//! Per-invocation EVM context.
//!
//! [`EvmCtx`] owns every entity it loads. Each collection is fetched from the
//! host at most once, and each join is computed at most once per parent. Views
//! pair a record with the context so joins can be followed from it:
//!
//! ```text
//! BlockView ──transactions()──► TransactionView ──call_traces()──► &CallTrace
//!                                               └─events()───────► &Event
//! ```

use std::ops::Deref;

use anyhow::{anyhow, Result};
use daemon_sdk_core::lazy::matching_indices;
use daemon_sdk_core::{
    CollectionKind, Host, HostBridge, Incident, LazyCollection, Relation, SdkConfig,
};
use tracing::trace;

use crate::block::Block;
use crate::call_trace::CallTrace;
use crate::event::Event;
use crate::transaction::Transaction;
use crate::tx_input::TxInput;

#[derive(Debug)]
pub struct EvmCtx {
    bridge: HostBridge,
    blocks: LazyCollection<Block>,
    transactions: LazyCollection<Transaction>,
    call_traces: LazyCollection<CallTrace>,
    events: LazyCollection<Event>,
    block_transactions: Relation,
    transaction_call_traces: Relation,
    transaction_events: Relation,
}

impl EvmCtx {
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, SdkConfig::default())
    }

    pub fn with_config(host: impl Host + 'static, config: SdkConfig) -> Self {
        Self {
            bridge: HostBridge::with_config(host, config),
            blocks: LazyCollection::new(),
            transactions: LazyCollection::new(),
            call_traces: LazyCollection::new(),
            events: LazyCollection::new(),
            block_transactions: Relation::new(),
            transaction_call_traces: Relation::new(),
            transaction_events: Relation::new(),
        }
    }

    /// Context bound to the wasm host imports.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::new(crate::wasm::EvmWasmHost)
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

    pub fn call_traces(&self) -> Result<&[CallTrace]> {
        self.call_traces
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::CallTraces))
    }

    pub fn events(&self) -> Result<&[Event]> {
        self.events
            .get_or_try_load(|| self.bridge.fetch_collection(CollectionKind::Events))
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

    pub fn block_views(&self) -> Result<Vec<BlockView<'_>>> {
        Ok(self
            .blocks()?
            .iter()
            .enumerate()
            .map(|(index, record)| BlockView {
                ctx: self,
                index,
                record,
            })
            .collect())
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
                trace!(block_index = block.block_index, "joining block transactions");
                Ok::<_, anyhow::Error>(matching_indices(txs, |tx| {
                    tx.block_index == block.block_index
                }))
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
                trace!(tx_hash = %tx.tx_hash, "joining transaction call traces");
                Ok::<_, anyhow::Error>(matching_indices(traces, |ct| {
                    ct.block_index == tx.block_index && ct.tx_index == tx.tx_index
                }))
            })?;
        Ok(indices.as_slice())
    }

    fn transaction_event_indices(&self, index: usize) -> Result<&[usize]> {
        let txs = self.transactions()?;
        let tx = &txs[index];
        let indices = self.transaction_events.get_or_try_init(txs.len(), index, || {
            let events = self.events()?;
            trace!(tx_hash = %tx.tx_hash, "joining transaction events");
            Ok::<_, anyhow::Error>(matching_indices(events, |ev| ev.tx_hash == tx.tx_hash))
        })?;
        Ok(indices.as_slice())
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct BlockView<'ctx> {
    ctx: &'ctx EvmCtx,
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

    /// Transactions included in this block, in host order.
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
    ctx: &'ctx EvmCtx,
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

    /// Calldata, decodable against an ABI signature.
    pub fn input(&self) -> TxInput<'ctx> {
        let (ctx, record) = (self.ctx, self.record);
        TxInput::new(&record.input, &ctx.bridge)
    }

    pub fn call_traces(&self) -> Result<Vec<&'ctx CallTrace>> {
        let ctx = self.ctx;
        let traces = ctx.call_traces()?;
        Ok(ctx
            .transaction_call_trace_indices(self.index)?
            .iter()
            .map(|&index| &traces[index])
            .collect())
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
}

impl Deref for TransactionView<'_> {
    type Target = Transaction;

    fn deref(&self) -> &Transaction {
        self.record
    }
}
