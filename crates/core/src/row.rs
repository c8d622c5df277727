//! Fetched rows
//!
//! A [`Row`] is what the store hands back for one result-set row: a mapping
//! from the select-list alias to its value.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One fetched row keyed by select-list alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(alias, value);
        self
    }

    /// Insert or replace a column
    pub fn insert(&mut self, alias: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(alias.into(), value.into());
    }

    /// Value under `alias`
    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.columns.get(alias)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(alias, value)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the row into its column map
    pub fn into_map(self) -> HashMap<String, Value> {
        self.columns
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(columns: HashMap<String, Value>) -> Self {
        Self { columns }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
