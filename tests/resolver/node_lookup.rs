//! Generic node lookup: every failure is reported

use crate::common::*;
use rownode::{encode, RequestedFields, ResolutionError, Row, Value};

fn all_fields() -> RequestedFields {
    RequestedFields::new(["id", "name"])
}

#[tokio::test]
async fn fetches_existing_row() {
    init_tracing();
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    let row = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get("name"), Some(&Value::String("a".into())));
    assert_eq!(row.get("id"), Some(&Value::Int(42)));
}

#[tokio::test]
async fn missing_row_is_none() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Int(43)]).unwrap();
    let row = executor.fetch_node(&token, &all_fields(), &store).await.unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn composite_key_lookup() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Membership", &[Value::Int(1), Value::Int(100)]).unwrap();
    let row = executor
        .fetch_node(&token, &RequestedFields::new(["role"]), &store)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get("role"), Some(&Value::String("owner".into())));

    let (text, params) = store.statements().pop().unwrap();
    assert_eq!(params, vec![Value::Int(1), Value::Int(100)]);
    assert!(text.contains("\"tenant_id\" = $1"));
    assert!(text.contains("\"id\" = $2"));
}

#[tokio::test]
async fn wrong_arity_is_invalid_identifier() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Membership", &[Value::Int(1)]).unwrap();
    let err = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidIdentifier { .. }));
    assert_eq!(store.statement_count(), 0);
}

#[tokio::test]
async fn unrenderable_key_is_invalid_identifier() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Object(Default::default())]).unwrap();
    let err = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidIdentifier { .. }));
    assert_eq!(store.statement_count(), 0);
}

#[tokio::test]
async fn unknown_tag_is_reported() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Nope", &[Value::Int(1)]).unwrap();
    let err = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap_err();
    assert_eq!(err, ResolutionError::UnknownTypeTag { tag: "Nope".into() });
}

#[tokio::test]
async fn malformed_token_is_reported() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let err = executor
        .fetch_node("definitely not an id", &all_fields(), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::MalformedIdentifier { .. }));
    assert_eq!(store.statement_count(), 0);
}

#[tokio::test]
async fn execution_failure_propagates() {
    let executor = create_executor();
    let store = MemoryStore::seeded();
    store.fail_with("relation does not exist");

    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    let err = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap_err();
    match err {
        ResolutionError::ExecutionFailure { reason } => {
            assert!(reason.contains("relation does not exist"))
        }
        other => panic!("expected ExecutionFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn values_are_bound_not_inlined() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let hostile = "g'; drop table app.gadgets; --";
    let token = encode("Gadget", &[Value::String(hostile.into())]).unwrap();
    let row = executor
        .fetch_node(&token, &RequestedFields::new(["code"]), &store)
        .await
        .unwrap();
    assert!(row.is_none());

    let (text, params) = store.statements().pop().unwrap();
    assert!(!text.contains("drop table"));
    assert!(text.contains("$1::\"pg_catalog\".\"text\""));
    assert_eq!(params, vec![Value::String(hostile.into())]);
}

#[tokio::test]
async fn only_first_row_is_used() {
    let executor = create_executor();
    let store = MemoryStore::seeded();
    store.duplicate_rows();

    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    let row = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get("name"), Some(&Value::String("a".into())));
}

#[tokio::test]
async fn node_id_round_trips_from_fetched_row() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Membership", &[Value::Int(1), Value::Int(100)]).unwrap();
    let row = executor
        .fetch_node(&token, &RequestedFields::default(), &store)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(executor.schema().node_id("Membership", &row).unwrap(), token);
}

#[tokio::test]
async fn statement_selects_identifiers() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Int(7)]).unwrap();
    executor
        .fetch_node(&token, &RequestedFields::new(["name"]), &store)
        .await
        .unwrap();
    let (text, _) = store.statements().pop().unwrap();
    assert!(text.starts_with("select \"__local_0__\".\"name\" as \"name\""));
    assert!(text.contains("as \"__identifiers\""));
    assert!(text.contains("from \"app\".\"widgets\" as \"__local_0__\""));
}

#[tokio::test]
async fn null_key_is_still_bound() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Null]).unwrap();
    let row = executor.fetch_node(&token, &all_fields(), &store).await.unwrap();
    assert!(row.is_none());

    let (text, params) = store.statements().pop().unwrap();
    assert_eq!(params, vec![Value::Null]);
    assert!(text.contains("\"id\" = $1::\"pg_catalog\".\"int4\""));
}

#[tokio::test]
async fn row_carries_exactly_the_requested_fields() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    let row = executor
        .fetch_node(&token, &all_fields(), &store)
        .await
        .unwrap()
        .unwrap();
    let expected = Row::new()
        .with("id", 42i64)
        .with("name", "a")
        .with("__identifiers", vec![Value::Int(42)]);
    assert_eq!(row, expected);

    let row = executor
        .fetch_node(&token, &RequestedFields::new(["name"]), &store)
        .await
        .unwrap()
        .unwrap();
    assert!(row.get("id").is_none());
    assert_eq!(row.get("name"), Some(&Value::String("a".into())));
}

#[tokio::test]
async fn columns_come_back_under_field_names() {
    let executor = create_executor();
    let store = MemoryStore::seeded();

    let token = encode("Membership", &[Value::Int(1), Value::Int(100)]).unwrap();
    let row = executor
        .fetch_node(&token, &RequestedFields::new(["tenantId", "role"]), &store)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get("tenantId"), Some(&Value::Int(1)));
    assert!(row.get("tenant_id").is_none());
    assert_eq!(row.get("role"), Some(&Value::String("owner".into())));
}
