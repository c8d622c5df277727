//! Single-table SELECT construction
//!
//! [`SelectQuery`] covers exactly what a lookup by key needs: one relation,
//! a projection, and predicates combined with `and`. Every builder method
//! consumes and returns the query, so concurrent resolutions never share a
//! mutable builder.

use crate::fragment::{CompiledQuery, SqlFragment};
use rownode_core::QualifiedName;
use std::fmt;
use std::sync::Arc;

/// Alias the base relation is bound to
pub const TABLE_ALIAS: &str = "__local_0__";

/// Builds an expression against the base table alias
pub type ExpressionBuilder = Arc<dyn Fn(&SqlFragment) -> SqlFragment + Send + Sync>;

/// One entry of a select list
#[derive(Clone)]
pub enum Selection {
    /// `alias."column" as "name"`
    Column {
        /// Column on the base relation
        column: String,
        /// Output alias
        alias: String,
    },
    /// `(expression) as "name"`, for computed values and nested structures
    Expression {
        /// Output alias
        alias: String,
        /// Renders the expression given the table alias
        build: ExpressionBuilder,
    },
}

impl Selection {
    /// Output alias of this selection
    pub fn alias(&self) -> &str {
        match self {
            Selection::Column { alias, .. } | Selection::Expression { alias, .. } => alias,
        }
    }

    fn render(&self, table_alias: &SqlFragment) -> SqlFragment {
        let value = match self {
            Selection::Column { column, .. } => table_alias
                .clone()
                .push_raw(".")
                .push(SqlFragment::identifier(&[column])),
            Selection::Expression { build, .. } => build(table_alias).parenthesized(),
        };
        value
            .push_raw(" as ")
            .push(SqlFragment::identifier(&[self.alias()]))
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Column { column, alias } => f
                .debug_struct("Column")
                .field("column", column)
                .field("alias", alias)
                .finish(),
            Selection::Expression { alias, .. } => {
                f.debug_struct("Expression").field("alias", alias).finish()
            }
        }
    }
}

/// Ordered select list with unique aliases
#[derive(Debug, Clone, Default)]
pub struct Projection {
    selections: Vec<Selection>,
}

impl Projection {
    /// Empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection; ignored if its alias is already selected
    pub fn with(mut self, selection: Selection) -> Self {
        if !self.contains(selection.alias()) {
            self.selections.push(selection);
        }
        self
    }

    /// Select a column under an alias
    pub fn column(self, column: impl Into<String>, alias: impl Into<String>) -> Self {
        self.with(Selection::Column {
            column: column.into(),
            alias: alias.into(),
        })
    }

    /// Select an expression under an alias
    pub fn expression<F>(self, alias: impl Into<String>, build: F) -> Self
    where
        F: Fn(&SqlFragment) -> SqlFragment + Send + Sync + 'static,
    {
        self.with(Selection::Expression {
            alias: alias.into(),
            build: Arc::new(build),
        })
    }

    /// Whether `alias` is already selected
    pub fn contains(&self, alias: &str) -> bool {
        self.selections.iter().any(|s| s.alias() == alias)
    }

    /// Number of selections
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Selections in order
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }
}

/// A SELECT against one relation
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: QualifiedName,
    projection: Projection,
    predicates: Vec<SqlFragment>,
}

impl SelectQuery {
    /// Select from `table`
    pub fn new(table: QualifiedName) -> Self {
        Self {
            table,
            projection: Projection::new(),
            predicates: Vec::new(),
        }
    }

    /// Fragment naming the base relation's alias
    pub fn table_alias() -> SqlFragment {
        SqlFragment::identifier(&[TABLE_ALIAS])
    }

    /// Replace the select list
    pub fn select(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Add a predicate; predicates are combined with `and`
    pub fn filter(mut self, predicate: SqlFragment) -> Self {
        if !predicate.is_empty() {
            self.predicates.push(predicate);
        }
        self
    }

    /// Base relation
    pub fn table(&self) -> &QualifiedName {
        &self.table
    }

    /// Render the full statement.
    ///
    /// An empty projection renders a zero-column select list, which still
    /// yields one (empty) row per match.
    pub fn to_fragment(&self) -> SqlFragment {
        let alias = Self::table_alias();
        let select_list = SqlFragment::join(
            self.projection.selections().iter().map(|s| s.render(&alias)),
            ", ",
        );

        let mut sql = SqlFragment::raw("select ");
        if !select_list.is_empty() {
            sql = sql.push(select_list).push_raw(" ");
        }
        sql = sql
            .push_raw("from ")
            .push(SqlFragment::identifier(&[
                self.table.namespace.as_str(),
                self.table.name.as_str(),
            ]))
            .push_raw(" as ")
            .push(alias);

        if !self.predicates.is_empty() {
            let conditions = SqlFragment::join(
                self.predicates.iter().cloned().map(SqlFragment::parenthesized),
                " and ",
            );
            sql = sql.push_raw(" where ").push(conditions);
        }
        sql
    }

    /// Compile to statement text and parameters
    pub fn compile(&self) -> CompiledQuery {
        self.to_fragment().compile()
    }
}

/// Build a query over `table` selecting `projection`, filtered by the
/// predicate `predicate` builds against the table alias.
///
/// # Errors
///
/// Propagates the predicate builder's error.
pub fn build_query<E, F>(
    table: QualifiedName,
    projection: Projection,
    predicate: F,
) -> Result<SelectQuery, E>
where
    F: FnOnce(&SqlFragment) -> Result<SqlFragment, E>,
{
    let predicate = predicate(&SelectQuery::table_alias())?;
    Ok(SelectQuery::new(table).select(projection).filter(predicate))
}
