mod common;

use anyhow::Result;
use common::Fixture;
use daemon_sdk_core::{CollectionKind, Incident, IncidentDataStruct, IncidentSeverity};
use daemon_sdk_test_utils::MockHost;
use daemon_sui_sdk::SuiCtx;

#[test]
fn test_collections_decode_in_order() -> Result<()> {
    let fixture = Fixture::new();
    let ctx = SuiCtx::new(fixture.host());

    assert_eq!(ctx.transactions()?, fixture.transactions.as_slice());
    assert_eq!(ctx.events()?, fixture.events.as_slice());
    assert_eq!(ctx.call_traces()?, fixture.call_traces.as_slice());
    assert_eq!(ctx.call_trace_type_args()?, fixture.type_args.as_slice());
    assert_eq!(ctx.call_trace_args()?, fixture.args.as_slice());
    Ok(())
}

#[test]
fn test_tx_is_first_transaction() -> Result<()> {
    let ctx = SuiCtx::new(Fixture::new().host());

    let tx = ctx.tx()?;
    assert_eq!(tx.index(), 0);
    assert_eq!(tx.digest, "digest1");
    Ok(())
}

#[test]
fn test_missing_transaction_is_an_error() {
    let ctx = SuiCtx::new(MockHost::new());
    let err = ctx.tx().unwrap_err();
    assert_eq!(err.to_string(), "host returned no transactions");
}

#[test]
fn test_transaction_joins() -> Result<()> {
    let ctx = SuiCtx::new(Fixture::new().host());
    let txs = ctx.transaction_views()?;

    let types: Vec<&str> = txs[0].events()?.iter().map(|ev| ev.typ.as_str()).collect();
    assert_eq!(
        types,
        vec!["0xdee9::clob_v2::OrderPlaced", "0xdee9::clob_v2::OrderFilled"]
    );

    let functions: Vec<String> = txs[0]
        .call_traces()?
        .iter()
        .map(|ct| ct.function.clone())
        .collect();
    assert_eq!(functions, vec!["place_limit_order", "swap_exact_base_for_quote"]);

    assert_eq!(txs[1].events()?.len(), 1);
    assert!(txs[1].call_traces()?.is_empty());
    Ok(())
}

#[test]
fn test_call_trace_args_and_type_args() -> Result<()> {
    let ctx = SuiCtx::new(Fixture::new().host());
    let traces = ctx.tx()?.call_traces()?;

    let type_args: Vec<&str> = traces[0]
        .type_args()?
        .iter()
        .map(|arg| arg.arg.as_str())
        .collect();
    assert_eq!(type_args, vec!["0x2::sui::SUI", "0xusdc::usdc::USDC"]);
    assert!(traces[1].type_args()?.is_empty());

    let seqs: Vec<u64> = traces[0].args()?.iter().map(|arg| arg.seq).collect();
    assert_eq!(seqs, vec![100, 102]);
    Ok(())
}

#[test]
fn test_arg_values_are_fetched_lazily_and_once() -> Result<()> {
    let host = Fixture::new().host();
    let ctx = SuiCtx::new(host.clone());
    let traces = ctx.tx()?.call_traces()?;

    let args = traces[0].args()?;
    assert_eq!(host.argument_fetches(100), 0);

    assert_eq!(args[0].value()?.as_u64()?, 5_000);
    assert_eq!(args[0].value()?.as_u64()?, 5_000);
    assert_eq!(host.argument_fetches(100), 1);
    assert_eq!(host.argument_fetches(102), 0);

    // A second view of the same argument shares the memoized value.
    let again = ctx.call_trace_views()?[0].args()?;
    assert_eq!(again[0].value()?.as_u64()?, 5_000);
    assert_eq!(host.argument_fetches(100), 1);
    assert_eq!(ctx.bridge().metrics().snapshot().argument_fetches, 1);
    Ok(())
}

#[test]
fn test_struct_arg_value() -> Result<()> {
    let ctx = SuiCtx::new(Fixture::new().host());
    let traces = ctx.tx()?.call_traces()?;

    let args = traces[1].args()?;
    let coin = args[0].value()?.as_struct()?;
    assert_eq!(coin.ty, "0x2::coin::Coin<0x2::sui::SUI>");
    assert_eq!(coin.field("balance").map(|v| v.as_u64()), Some(Ok(42)));
    Ok(())
}

#[test]
fn test_missing_arg_value_is_an_error() -> Result<()> {
    let fixture = Fixture::new();
    let host = MockHost::new()
        .with_collection(
            CollectionKind::Transactions,
            &common::encode_transactions(&fixture.transactions),
        )
        .with_collection(
            CollectionKind::CallTraces,
            &common::encode_call_traces(&fixture.call_traces),
        )
        .with_collection(CollectionKind::CallTraceArgs, &common::encode_args(&fixture.args));
    let ctx = SuiCtx::new(host);

    let args = ctx.tx()?.call_traces()?[0].args()?;
    let err = args[0].value().unwrap_err();
    assert!(err.to_string().contains("argument 100"));
    Ok(())
}

#[test]
fn test_each_collection_fetched_once() -> Result<()> {
    let host = Fixture::new().host();
    let ctx = SuiCtx::new(host.clone());

    for _ in 0..2 {
        for tx in ctx.transaction_views()? {
            tx.events()?;
            for ct in tx.call_traces()? {
                ct.type_args()?;
                ct.args()?;
            }
        }
    }

    for kind in [
        CollectionKind::Transactions,
        CollectionKind::Events,
        CollectionKind::CallTraces,
        CollectionKind::CallTraceTypeArgs,
        CollectionKind::CallTraceArgs,
    ] {
        assert_eq!(host.collection_fetches(kind), 1, "{kind} fetched more than once");
    }
    assert_eq!(host.collection_fetches(CollectionKind::Blocks), 0);
    Ok(())
}

#[test]
fn test_report_incident_with_struct_data() -> Result<()> {
    let host = Fixture::new().host();
    let ctx = SuiCtx::new(host.clone());
    let tx = ctx.tx()?;

    let mut data = IncidentDataStruct::new();
    data.add_string("digest", tx.digest.clone());
    data.add_number("gas_used", tx.gas_used as f64);

    ctx.report(
        &Incident::new(IncidentSeverity::Warning, "large order")
            .with_address(tx.sender.clone())
            .with_data(data),
    )?;

    assert_eq!(
        host.incidents(),
        vec![
            r#"{"severity":"warning","message":"large order","address":"0xalice","data":{"digest":"digest1","gas_used":2000.0}}"#
        ]
    );
    Ok(())
}
