//! Fixture encoders mirroring the host's wire layout for EVM entities.

#![allow(dead_code)]

use daemon_evm_sdk::{Block, CallTrace, Event, Transaction};
use daemon_sdk_core::CollectionKind;
use daemon_sdk_test_utils::{collection, MockHost};

pub fn block(block_index: u64) -> Block {
    Block {
        block_index,
        hash: format!("0xblock{block_index}"),
        parent_hash: format!("0xblock{}", block_index - 1),
        state_root: "0xroot".to_string(),
        nonce: 0,
        status: "finalized".to_string(),
        timestamp: 1_700_000_000 + block_index,
        block_reward: vec![0x1b, 0xc1, 0x6d, 0x67],
        fee_recipient: "0xbuilder".to_string(),
        total_difficulty: 0,
        size: 1_024.5,
        gas_used: 15_000_000,
        gas_limit: 30_000_000,
    }
}

pub fn transaction(block_index: u64, tx_index: u32, tx_hash: &str) -> Transaction {
    Transaction {
        tx_index,
        tx_hash: tx_hash.to_string(),
        typ: 2,
        nonce: tx_index as u64,
        status: 1,
        block_index,
        from: "0xalice".to_string(),
        to: Some("0xtoken".to_string()),
        value: 0,
        fee: 420_000,
        gas_price: 20,
        gas_limit: 100_000,
        gas_used: 21_000,
        input: vec![0xa9, 0x05, 0x9c, 0xbb, 0x00, 0xff],
        size: 180.0,
    }
}

pub fn call_trace(seq: u32, block_index: u64, tx_index: u32) -> CallTrace {
    CallTrace {
        seq,
        tx_index,
        block_index,
        depth: seq % 3,
        typ: "CALL".to_string(),
        from: "0xalice".to_string(),
        to: "0xtoken".to_string(),
        value: 0,
        gas_limit: 90_000,
        gas_used: 30_000,
        input: vec![0x70, 0xa0, 0x82, 0x31],
    }
}

pub fn event(index: u32, tx_hash: &str) -> Event {
    Event {
        index,
        tx_index: 0,
        tx_hash: tx_hash.to_string(),
        block_number: 100,
        block_hash: "0xblock100".to_string(),
        address: "0xtoken".to_string(),
        topic0: vec![0xdd; 32],
        topic1: vec![0x01; 32],
        topic2: vec![0x02; 32],
        topic3: Vec::new(),
        topic4: Vec::new(),
        data: vec![0, 0, 0, 200],
    }
}

pub fn encode_blocks(blocks: &[Block]) -> Vec<u8> {
    collection(blocks, 13, |w, b| {
        w.uint(b.block_index)
            .str(&b.hash)
            .str(&b.parent_hash)
            .str(&b.state_root)
            .uint(b.nonce)
            .str(&b.status)
            .uint(b.timestamp)
            .bin(&b.block_reward)
            .str(&b.fee_recipient)
            .uint(b.total_difficulty)
            .f64(b.size)
            .uint(b.gas_used)
            .uint(b.gas_limit);
    })
}

pub fn encode_transactions(txs: &[Transaction]) -> Vec<u8> {
    collection(txs, 15, |w, tx| {
        w.uint(tx.tx_index as u64)
            .str(&tx.tx_hash)
            .uint(tx.typ as u64)
            .uint(tx.nonce)
            .uint(tx.status)
            .uint(tx.block_index)
            .str(&tx.from)
            .opt_str(tx.to.as_deref())
            .uint(tx.value)
            .uint(tx.fee)
            .uint(tx.gas_price)
            .uint(tx.gas_limit)
            .uint(tx.gas_used)
            .bin(&tx.input)
            .f64(tx.size);
    })
}

pub fn encode_call_traces(traces: &[CallTrace]) -> Vec<u8> {
    collection(traces, 11, |w, ct| {
        w.uint(ct.seq as u64)
            .uint(ct.tx_index as u64)
            .uint(ct.block_index)
            .uint(ct.depth as u64)
            .str(&ct.typ)
            .str(&ct.from)
            .str(&ct.to)
            .uint(ct.value)
            .uint(ct.gas_limit)
            .uint(ct.gas_used)
            .byte_list(&ct.input);
    })
}

pub fn encode_events(events: &[Event]) -> Vec<u8> {
    collection(events, 12, |w, ev| {
        w.uint(ev.index as u64)
            .uint(ev.tx_index as u64)
            .str(&ev.tx_hash)
            .uint(ev.block_number)
            .str(&ev.block_hash)
            .str(&ev.address)
            .byte_list(&ev.topic0)
            .byte_list(&ev.topic1)
            .byte_list(&ev.topic2)
            .byte_list(&ev.topic3)
            .byte_list(&ev.topic4)
            .byte_list(&ev.data);
    })
}

/// One block with two transactions, plus a stray transaction from block 99.
pub struct Fixture {
    pub blocks: Vec<Block>,
    pub transactions: Vec<Transaction>,
    pub call_traces: Vec<CallTrace>,
    pub events: Vec<Event>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            blocks: vec![block(100)],
            transactions: vec![
                transaction(100, 0, "0xaa"),
                transaction(100, 1, "0xbb"),
                transaction(99, 0, "0xcc"),
            ],
            call_traces: vec![
                call_trace(0, 100, 0),
                call_trace(1, 100, 1),
                call_trace(2, 100, 0),
                call_trace(3, 99, 0),
            ],
            events: vec![event(0, "0xbb"), event(1, "0xaa"), event(2, "0xbb")],
        }
    }

    pub fn host(&self) -> MockHost {
        MockHost::new()
            .with_collection(CollectionKind::Blocks, &encode_blocks(&self.blocks))
            .with_collection(
                CollectionKind::Transactions,
                &encode_transactions(&self.transactions),
            )
            .with_collection(
                CollectionKind::CallTraces,
                &encode_call_traces(&self.call_traces),
            )
            .with_collection(CollectionKind::Events, &encode_events(&self.events))
    }
}
