//! Host bridge tests against the in-process host double.

use anyhow::Result;
use daemon_sdk_core::{
    CollectionKind, Decode, DecodeError, Decoder, Handle, HostBridge, HostError, HttpRequest,
    Incident, IncidentSeverity, SdkConfig,
};
use daemon_sdk_test_utils::{collection, MockHost, MsgPackWriter};

#[derive(Debug, PartialEq)]
struct Row {
    id: u64,
    label: Option<String>,
}

impl Decode for Row {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: decoder.read_u64()?,
            label: decoder.read_optional(|d| d.read_string())?,
        })
    }
}

fn rows_bytes() -> Vec<u8> {
    let rows = [(1u64, Some("one")), (2, None), (3, Some("three"))];
    collection(&rows, 2, |w, (id, label)| {
        w.uint(*id).opt_str(*label);
    })
}

#[test]
fn test_fetch_collection_decodes_in_order() -> Result<()> {
    let host = MockHost::new().with_collection(CollectionKind::Transactions, &rows_bytes());
    let bridge = HostBridge::new(host.clone());

    let rows: Vec<Row> = bridge.fetch_collection(CollectionKind::Transactions)?;
    assert_eq!(
        rows,
        vec![
            Row { id: 1, label: Some("one".into()) },
            Row { id: 2, label: None },
            Row { id: 3, label: Some("three".into()) },
        ]
    );

    assert_eq!(host.collection_fetches(CollectionKind::Transactions), 1);
    let snapshot = bridge.metrics().snapshot();
    assert_eq!(snapshot.transaction_fetches, 1);
    assert_eq!(snapshot.bytes_read, rows_bytes().len() as u64);
    Ok(())
}

#[test]
fn test_missing_collection_is_empty() -> Result<()> {
    let bridge = HostBridge::new(MockHost::new());
    let rows: Vec<Row> = bridge.fetch_collection(CollectionKind::Events)?;
    assert!(rows.is_empty());
    Ok(())
}

#[test]
fn test_out_of_bounds_handle_fails() {
    let host = MockHost::new()
        .with_collection_handle(CollectionKind::Events, Handle::pack(1_000_000, 10));
    let bridge = HostBridge::new(host);

    let err = bridge.fetch_collection::<Row>(CollectionKind::Events).unwrap_err();
    assert!(err.to_string().contains("Failed to read events buffer"));
    assert!(matches!(
        err.downcast_ref::<HostError>(),
        Some(HostError::OutOfBounds { offset: 1_000_000, .. })
    ));
}

#[test]
fn test_malformed_collection_fails_whole() {
    let mut bytes = MsgPackWriter::new();
    bytes.array(2).array(2).uint(1).nil().array(2).str("oops").nil();
    let host = MockHost::new().with_collection(CollectionKind::CallTraces, bytes.as_bytes());
    let bridge = HostBridge::new(host);

    let err = bridge
        .fetch_collection::<Row>(CollectionKind::CallTraces)
        .unwrap_err();
    assert!(err.to_string().contains("Failed to decode call traces"));
    assert!(err.downcast_ref::<DecodeError>().is_some());
}

#[test]
fn test_trailing_bytes_policy() -> Result<()> {
    let mut bytes = rows_bytes();
    bytes.push(0xc0);

    let host = MockHost::new().with_collection(CollectionKind::Blocks, &bytes);
    let lenient = HostBridge::new(host.clone());
    assert_eq!(lenient.fetch_collection::<Row>(CollectionKind::Blocks)?.len(), 3);

    let strict = HostBridge::with_config(host, SdkConfig::default().rejecting_trailing_bytes());
    assert!(strict.fetch_collection::<Row>(CollectionKind::Blocks).is_err());
    Ok(())
}

#[test]
fn test_fetch_argument_value() -> Result<()> {
    let mut value = MsgPackWriter::new();
    value.tag("u64").uint(99);

    let host = MockHost::new().with_argument_value(7, value.as_bytes());
    let bridge = HostBridge::new(host.clone());

    assert_eq!(bridge.fetch_argument_value(7)?.as_u64()?, 99);
    assert_eq!(host.argument_fetches(7), 1);
    assert_eq!(bridge.metrics().snapshot().argument_fetches, 1);
    Ok(())
}

#[test]
fn test_parse_input() -> Result<()> {
    let host = MockHost::new().with_parsed_input("transfer(address,uint256)", &[0x90]);
    let bridge = HostBridge::new(host.clone());

    let matched = bridge.parse_input("transfer(address,uint256)", &[0, 1, 2, 3])?;
    assert_eq!(matched.map(|b| b.into_inner()), Some(vec![0x90]));

    assert!(bridge.parse_input("approve(address,uint256)", &[])?.is_none());

    let requests = host.parse_requests();
    assert_eq!(requests[0].1, "AAECAw==");
    assert_eq!(requests[1].0, "approve(address,uint256)");
    Ok(())
}

#[test]
fn test_report_emits_json() -> Result<()> {
    let host = MockHost::new();
    let bridge = HostBridge::new(host.clone());

    bridge.report(&Incident::new(IncidentSeverity::Warning, "low balance"))?;

    assert_eq!(
        host.incidents(),
        vec![r#"{"severity":"warning","message":"low balance"}"#.to_string()]
    );
    assert_eq!(bridge.metrics().snapshot().incidents_reported, 1);
    Ok(())
}

#[test]
fn test_parameters() -> Result<()> {
    let host = MockHost::new().with_parameter("threshold", "1000");
    let bridge = HostBridge::new(host);

    assert_eq!(bridge.parameter("threshold")?.as_number(), Some(1000.0));

    let err = bridge.parameter("missing").unwrap_err();
    assert_eq!(err.to_string(), r#"No parameter found with key "missing""#);
    Ok(())
}

#[test]
fn test_http_roundtrip() -> Result<()> {
    let host = MockHost::new().with_http_response(r#"{"status":200,"headers":{},"body":[111,107]}"#);
    let bridge = HostBridge::new(host.clone());

    let response = bridge.http(&HttpRequest::get("https://example.com/"))?;
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), Some("ok"));

    assert_eq!(
        host.http_requests(),
        vec![r#"{"method":"GET","url":"https://example.com/","headers":{}}"#.to_string()]
    );
    Ok(())
}

#[test]
fn test_query_rows() -> Result<()> {
    let sql = "SELECT t.gas_used FROM transactions t";
    let host = MockHost::new().with_query_result(sql, r#"[{"gas_used":42000},{"gas_used":21000}]"#);
    let bridge = HostBridge::new(host.clone());

    let rows = bridge.query(sql)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["gas_used"], 42000);

    assert!(bridge.query("SELECT nothing")?.is_empty());
    assert_eq!(host.queries().len(), 2);
    assert_eq!(bridge.metrics().snapshot().outbound_calls, 2);
    Ok(())
}
