//! Common test utilities for resolver tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rownode::{
    Attribute, ExecutionContext, ExecutionError, Executor, PrimaryKeyColumn, QualifiedName, Row,
    RowType, Schema, TypeRef, Value,
};
use std::sync::Arc;

/// Install a test-friendly tracing subscriber (idempotent)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// `app.widgets`, keyed by a single int4 `id`
pub fn widget_type() -> RowType {
    RowType::new("Widget", Some("app"), "widgets")
        .with_key(PrimaryKeyColumn::new("id", TypeRef::int4()))
        .with_attribute(Attribute::new("id", "id"))
        .with_attribute(Attribute::new("name", "name"))
}

/// `app.memberships`, keyed by `(tenant_id, id)`
pub fn membership_type() -> RowType {
    RowType::new("Membership", Some("app"), "memberships")
        .with_key(PrimaryKeyColumn::new("tenant_id", TypeRef::int4()))
        .with_key(PrimaryKeyColumn::new("id", TypeRef::int8()))
        .with_attribute(Attribute::new("tenant_id", "tenantId"))
        .with_attribute(Attribute::new("id", "id"))
        .with_attribute(Attribute::new("role", "role"))
}

/// `app.gadgets`, keyed by a text `code`
pub fn gadget_type() -> RowType {
    RowType::new("Gadget", Some("app"), "gadgets")
        .with_key(PrimaryKeyColumn::new("code", TypeRef::text()))
        .with_attribute(Attribute::new("code", "code"))
}

/// Schema with Widget, Membership and Gadget registered
pub fn create_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder()
            .row_types([widget_type(), membership_type(), gadget_type()])
            .build()
            .unwrap(),
    )
}

/// Executor over [`create_schema`]
pub fn create_executor() -> Executor {
    Executor::new(create_schema())
}

struct Table {
    name: QualifiedName,
    key_columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Default)]
struct StoreState {
    tables: Vec<Table>,
    statements: Vec<(String, Vec<Value>)>,
    failure: Option<String>,
    duplicate_rows: bool,
}

/// In-memory execution context.
///
/// Answers key lookups by matching bound parameters against the key columns
/// of the table named in the statement, returns only the aliases the
/// statement selects, and records every statement it runs.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with widgets 42 and 7 and membership (1, 100)
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert(
            &widget_type(),
            Row::new().with("id", 42i64).with("name", "a"),
        );
        store.insert(&widget_type(), Row::new().with("id", 7i64).with("name", "b"));
        store.insert(
            &membership_type(),
            Row::new()
                .with("tenant_id", 1i64)
                .with("id", 100i64)
                .with("role", "owner"),
        );
        store.insert(&gadget_type(), Row::new().with("code", "g-1"));
        store
    }

    pub fn insert(&self, row_type: &RowType, row: Row) {
        let name = row_type.qualified_name().unwrap();
        let mut state = self.state.lock();
        let position = state.tables.iter().position(|t| t.name == name);
        let table = match position {
            Some(i) => &mut state.tables[i],
            None => {
                state.tables.push(Table {
                    name,
                    key_columns: row_type.primary_key.iter().map(|c| c.name.clone()).collect(),
                    rows: Vec::new(),
                });
                state.tables.last_mut().unwrap()
            }
        };
        table.rows.push(row);
    }

    /// Fail every subsequent statement with `reason`
    pub fn fail_with(&self, reason: &str) {
        self.state.lock().failure = Some(reason.to_string());
    }

    /// Return every match twice
    pub fn duplicate_rows(&self) {
        self.state.lock().duplicate_rows = true;
    }

    /// Statements executed so far
    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().statements.clone()
    }

    pub fn statement_count(&self) -> usize {
        self.state.lock().statements.len()
    }
}

#[async_trait]
impl ExecutionContext for MemoryStore {
    async fn query(&self, text: &str, params: &[Value]) -> Result<Vec<Row>, ExecutionError> {
        let mut state = self.state.lock();
        state.statements.push((text.to_string(), params.to_vec()));
        if let Some(reason) = &state.failure {
            return Err(ExecutionError::Query(reason.clone()));
        }

        let table = state.tables.iter().find(|t| {
            text.contains(&format!(
                "from \"{}\".\"{}\"",
                t.name.namespace, t.name.name
            ))
        });
        let Some(table) = table else {
            return Ok(Vec::new());
        };
        if params.len() != table.key_columns.len() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<Row> = table
            .rows
            .iter()
            .filter(|row| {
                table
                    .key_columns
                    .iter()
                    .zip(params)
                    .all(|(column, param)| row.get(column) == Some(param))
            })
            .map(|row| project(text, &table.key_columns, row))
            .collect();
        if state.duplicate_rows {
            let extra: Vec<Row> = matches
                .iter()
                .cloned()
                .map(|row| row.with("name", "duplicate"))
                .collect();
            matches.extend(extra);
        }
        Ok(matches)
    }
}

/// Shape a stored row like the statement's select list.
///
/// Plain columns appear as `"__local_0__"."column" as "alias"`; the
/// `__identifiers` expression is rebuilt from the key columns.
fn project(text: &str, key_columns: &[String], row: &Row) -> Row {
    let select_list = text.split(" from ").next().unwrap_or_default();
    let mut projected = Row::new();
    let mut rest = select_list;
    while let Some(start) = rest.find("\"__local_0__\".\"") {
        rest = &rest[start + "\"__local_0__\".\"".len()..];
        let Some(end) = rest.find('"') else { break };
        let column = &rest[..end];
        rest = &rest[end + 1..];
        if let Some(aliased) = rest.strip_prefix(" as \"") {
            let Some(end) = aliased.find('"') else { break };
            if let Some(value) = row.get(column) {
                projected.insert(&aliased[..end], value.clone());
            }
        }
    }
    if select_list.contains(" as \"__identifiers\"") {
        let identifiers: Vec<Value> = key_columns
            .iter()
            .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
            .collect();
        projected.insert("__identifiers", identifiers);
    }
    projected
}
