//! Fixture encoders mirroring the host's wire layout for Aptos entities.

#![allow(dead_code)]

use daemon_aptos_sdk::{Block, CallTrace, CallTraceArg, CallTraceTypeArg, Event, Transaction};
use daemon_sdk_core::CollectionKind;
use daemon_sdk_test_utils::{collection, MockHost, MsgPackWriter};

pub fn block(hash: &str) -> Block {
    Block {
        hash: hash.to_string(),
        epoch: 7,
        timestamp_usecs: 1_700_000_000_000_000,
    }
}

pub fn transaction(seq: u64, block_hash: &str, status: u64) -> Transaction {
    Transaction {
        seq,
        block_hash: block_hash.to_string(),
        hash: format!("0xtx{seq}"),
        event_root_hash: "0xevents".to_string(),
        state_change_hash: "0xstate".to_string(),
        gas_used: 600,
        max_gas_amount: 2_000,
        gas_unit_price: 100,
        expiration_timestamp_secs: 1_700_000_600,
        status,
        sender: "0xalice".to_string(),
        sequence_number: seq + 40,
    }
}

pub fn event(tx_seq: u64, sequence_number: u64) -> Event {
    Event {
        tx_seq,
        key: "0x0000000000000003".to_string(),
        sequence_number,
        typ: "0x1::coin::WithdrawEvent".to_string(),
        data: vec![0x10, 0x27, 0, 0, 0, 0, 0, 0],
    }
}

pub fn call_trace(seq: u64, tx_seq: u64, depth: u32, function: &str) -> CallTrace {
    CallTrace {
        seq,
        tx_seq,
        depth,
        call_type: 0,
        gas_used: 120,
        transaction_module: Some("coin".to_string()),
        function: function.to_string(),
    }
}

pub fn encode_blocks(blocks: &[Block]) -> Vec<u8> {
    collection(blocks, 3, |w, b| {
        w.str(&b.hash).uint(b.epoch).uint(b.timestamp_usecs);
    })
}

pub fn encode_transactions(txs: &[Transaction]) -> Vec<u8> {
    collection(txs, 12, |w, tx| {
        w.uint(tx.seq)
            .str(&tx.block_hash)
            .str(&tx.hash)
            .str(&tx.event_root_hash)
            .str(&tx.state_change_hash)
            .uint(tx.gas_used)
            .uint(tx.max_gas_amount)
            .uint(tx.gas_unit_price)
            .uint(tx.expiration_timestamp_secs)
            .uint(tx.status)
            .str(&tx.sender)
            .uint(tx.sequence_number);
    })
}

pub fn encode_events(events: &[Event]) -> Vec<u8> {
    collection(events, 5, |w, ev| {
        w.uint(ev.tx_seq)
            .str(&ev.key)
            .uint(ev.sequence_number)
            .str(&ev.typ)
            .bin(&ev.data);
    })
}

pub fn encode_call_traces(traces: &[CallTrace]) -> Vec<u8> {
    collection(traces, 7, |w, ct| {
        w.uint(ct.seq)
            .uint(ct.tx_seq)
            .uint(ct.depth as u64)
            .uint(ct.call_type as u64)
            .uint(ct.gas_used)
            .opt_str(ct.transaction_module.as_deref())
            .str(&ct.function);
    })
}

pub fn encode_type_args(type_args: &[CallTraceTypeArg]) -> Vec<u8> {
    collection(type_args, 3, |w, arg| {
        w.uint(arg.seq).uint(arg.call_trace_seq).str(&arg.arg);
    })
}

pub fn encode_args(args: &[CallTraceArg]) -> Vec<u8> {
    collection(args, 2, |w, arg| {
        w.uint(arg.seq).uint(arg.call_trace_seq);
    })
}

/// `{"s": address}`
pub fn address_value(address: &str) -> Vec<u8> {
    let mut w = MsgPackWriter::new();
    w.tag("s").str(address);
    w.into_bytes()
}

/// `{"l": [{"u64": a}, {"u64": b}, ...]}`
pub fn amounts_value(amounts: &[u64]) -> Vec<u8> {
    let mut w = MsgPackWriter::new();
    w.tag("l").array(amounts.len() as u32);
    for amount in amounts {
        w.tag("u64").uint(*amount);
    }
    w.into_bytes()
}

/// Block `0xb1` with a successful transfer and a failed one, plus a
/// transaction from another block.
pub struct Fixture {
    pub blocks: Vec<Block>,
    pub transactions: Vec<Transaction>,
    pub events: Vec<Event>,
    pub call_traces: Vec<CallTrace>,
    pub type_args: Vec<CallTraceTypeArg>,
    pub args: Vec<CallTraceArg>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            blocks: vec![block("0xb1")],
            transactions: vec![
                transaction(0, "0xb1", 0),
                transaction(1, "0xb0", 0),
                transaction(2, "0xb1", 4016),
            ],
            events: vec![event(0, 1), event(0, 2), event(2, 3)],
            call_traces: vec![
                call_trace(20, 0, 0, "transfer"),
                call_trace(21, 0, 1, "withdraw"),
                call_trace(22, 2, 0, "transfer"),
            ],
            type_args: vec![CallTraceTypeArg {
                seq: 0,
                call_trace_seq: 20,
                arg: "0x1::aptos_coin::AptosCoin".to_string(),
            }],
            args: vec![
                CallTraceArg {
                    seq: 200,
                    call_trace_seq: 20,
                },
                CallTraceArg {
                    seq: 201,
                    call_trace_seq: 20,
                },
                CallTraceArg {
                    seq: 202,
                    call_trace_seq: 22,
                },
            ],
        }
    }

    pub fn host(&self) -> MockHost {
        MockHost::new()
            .with_collection(CollectionKind::Blocks, &encode_blocks(&self.blocks))
            .with_collection(
                CollectionKind::Transactions,
                &encode_transactions(&self.transactions),
            )
            .with_collection(CollectionKind::Events, &encode_events(&self.events))
            .with_collection(
                CollectionKind::CallTraces,
                &encode_call_traces(&self.call_traces),
            )
            .with_collection(
                CollectionKind::CallTraceTypeArgs,
                &encode_type_args(&self.type_args),
            )
            .with_collection(CollectionKind::CallTraceArgs, &encode_args(&self.args))
            .with_argument_value(200, &address_value("0xbob"))
            .with_argument_value(201, &amounts_value(&[10_000, 250]))
    }
}
