//! Which row types become addressable

use crate::common::*;
use rownode::{
    encode, Executor, NodeConfig, PrimaryKeyColumn, RequestedFields, ResolutionError, RowType,
    Schema, SchemaError, TypeRef, Value,
};
use std::sync::Arc;

#[test]
fn every_keyed_type_gets_a_root_field() {
    let schema = create_schema();
    let names: Vec<&str> = schema.root_fields().map(|f| f.name()).collect();
    assert_eq!(names, vec!["gadget", "membership", "widget"]);
    for field in schema.root_fields() {
        assert_eq!(field.argument(), "nodeId");
        assert!(schema.node_type(&field.row_type().name).is_some());
    }
}

#[test]
fn root_field_and_node_table_share_the_row_type() {
    let schema = create_schema();
    let field = schema.root_field("widget").unwrap();
    assert!(Arc::ptr_eq(field.row_type(), schema.node_type("Widget").unwrap()));
}

#[tokio::test]
async fn omitted_type_is_unreachable() {
    let schema = Schema::builder()
        .row_type(widget_type().omitted())
        .row_type(gadget_type())
        .build()
        .unwrap();
    let executor = Executor::new(Arc::new(schema));
    let store = MemoryStore::seeded();

    assert!(executor.schema().root_field("widget").is_none());
    let token = encode("Widget", &[Value::Int(42)]).unwrap();
    let err = executor
        .fetch_node(&token, &RequestedFields::default(), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::UnknownTypeTag { .. }));
    assert_eq!(store.statement_count(), 0);
}

#[tokio::test]
async fn keyless_type_is_unreachable() {
    let log = RowType::new("AuditLog", Some("app"), "audit_log");
    let schema = Schema::builder().row_types([log, widget_type()]).build().unwrap();
    let executor = Executor::new(Arc::new(schema));
    let store = MemoryStore::new();

    assert_eq!(executor.schema().len(), 1);
    assert!(executor.schema().root_field("auditLog").is_none());
    let token = encode("AuditLog", &[]).unwrap();
    assert!(executor
        .fetch_node(&token, &RequestedFields::default(), &store)
        .await
        .is_err());
}

#[test]
fn config_from_toml_applies() {
    let config = NodeConfig::from_toml_str(
        r#"
node_id_field_name = "id"
omit_read = ["app.gadgets"]

[inflection]
field_suffix = "ByNodeId"
"#,
    )
    .unwrap();
    let schema = Schema::builder()
        .config(config)
        .row_types([widget_type(), gadget_type()])
        .build()
        .unwrap();

    let field = schema.root_field("widgetByNodeId").unwrap();
    assert_eq!(field.argument(), "id");
    assert!(schema.node_type("Gadget").is_none());
}

#[test]
fn default_config_text_parses_to_defaults() {
    let config = NodeConfig::from_toml_str(NodeConfig::default_toml()).unwrap();
    assert_eq!(config, NodeConfig::default());
}

#[test]
fn reserved_node_field_is_rejected() {
    let node = RowType::new("Node", Some("app"), "nodes")
        .with_key(PrimaryKeyColumn::new("id", TypeRef::int4()));
    let err = Schema::builder().row_type(node).build().unwrap_err();
    assert_eq!(
        err,
        SchemaError::ReservedField {
            field: "node".into(),
            type_name: "Node".into(),
        }
    );
}
