//! Fixture encoders mirroring the host's wire layout for Sui entities.

#![allow(dead_code)]

use daemon_sdk_core::CollectionKind;
use daemon_sdk_test_utils::{collection, MockHost, MsgPackWriter};
use daemon_sui_sdk::{CallTrace, CallTraceArg, CallTraceTypeArg, Event, Transaction};

pub fn transaction(seq: u64, digest: &str) -> Transaction {
    Transaction {
        seq,
        digest: digest.to_string(),
        time: 1_700_000_000_000 + seq as i64,
        gas_used: 2_000,
        gas_computation_cost: 1_000,
        gas_storage_cost: 1_500,
        gas_budget: 50_000_000,
        sender: "0xalice".to_string(),
        kind: "ProgrammableTransaction".to_string(),
    }
}

pub fn event(tx_seq: u64, typ: &str) -> Event {
    Event {
        tx_seq,
        package_id: "0xdee9".to_string(),
        transaction_module: "clob_v2".to_string(),
        sender: "0xalice".to_string(),
        typ: typ.to_string(),
        contents: vec![0x01, 0x00, 0xff],
    }
}

pub fn call_trace(seq: u64, tx_seq: u64, function: &str) -> CallTrace {
    CallTrace {
        seq,
        tx_seq,
        depth: 0,
        call_type: 0,
        gas_used: 300,
        transaction_module: Some("clob_v2".to_string()),
        function: function.to_string(),
    }
}

pub fn encode_transactions(txs: &[Transaction]) -> Vec<u8> {
    collection(txs, 9, |w, tx| {
        w.uint(tx.seq)
            .str(&tx.digest)
            .sint(tx.time)
            .uint(tx.gas_used)
            .uint(tx.gas_computation_cost)
            .uint(tx.gas_storage_cost)
            .uint(tx.gas_budget)
            .str(&tx.sender)
            .str(&tx.kind);
    })
}

pub fn encode_events(events: &[Event]) -> Vec<u8> {
    collection(events, 6, |w, ev| {
        w.uint(ev.tx_seq)
            .str(&ev.package_id)
            .str(&ev.transaction_module)
            .str(&ev.sender)
            .str(&ev.typ)
            .bin(&ev.contents);
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

/// `{"u64": value}`
pub fn u64_value(value: u64) -> Vec<u8> {
    let mut w = MsgPackWriter::new();
    w.tag("u64").uint(value);
    w.into_bytes()
}

/// `{"st": ["0x2::coin::Coin<0x2::sui::SUI>", {"balance": {"u64": balance}}]}`
pub fn coin_value(balance: u64) -> Vec<u8> {
    let mut w = MsgPackWriter::new();
    w.tag("st")
        .array(2)
        .str("0x2::coin::Coin<0x2::sui::SUI>")
        .map(1)
        .str("balance")
        .tag("u64")
        .uint(balance);
    w.into_bytes()
}

/// Two transactions. The first places an order through two calls, the second
/// is a plain transfer with no call traces.
pub struct Fixture {
    pub transactions: Vec<Transaction>,
    pub events: Vec<Event>,
    pub call_traces: Vec<CallTrace>,
    pub type_args: Vec<CallTraceTypeArg>,
    pub args: Vec<CallTraceArg>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            transactions: vec![transaction(1, "digest1"), transaction(2, "digest2")],
            events: vec![
                event(1, "0xdee9::clob_v2::OrderPlaced"),
                event(2, "0x2::coin::Transfer"),
                event(1, "0xdee9::clob_v2::OrderFilled"),
            ],
            call_traces: vec![
                call_trace(10, 1, "place_limit_order"),
                call_trace(11, 1, "swap_exact_base_for_quote"),
            ],
            type_args: vec![
                CallTraceTypeArg {
                    seq: 0,
                    call_trace_seq: 10,
                    arg: "0x2::sui::SUI".to_string(),
                },
                CallTraceTypeArg {
                    seq: 1,
                    call_trace_seq: 10,
                    arg: "0xusdc::usdc::USDC".to_string(),
                },
            ],
            args: vec![
                CallTraceArg {
                    seq: 100,
                    call_trace_seq: 10,
                },
                CallTraceArg {
                    seq: 101,
                    call_trace_seq: 11,
                },
                CallTraceArg {
                    seq: 102,
                    call_trace_seq: 10,
                },
            ],
        }
    }

    pub fn host(&self) -> MockHost {
        MockHost::new()
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
            .with_argument_value(100, &u64_value(5_000))
            .with_argument_value(101, &coin_value(42))
            .with_argument_value(102, &u64_value(7))
    }
}
