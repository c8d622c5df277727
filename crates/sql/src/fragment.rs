//! Immutable SQL fragments
//!
//! A [`SqlFragment`] is a sequence of trusted text, quoted identifiers and
//! bound values. Values never become part of the statement text: compiling a
//! fragment replaces each one with a positional placeholder (`$1`, `$2`, ...)
//! and collects it into the parameter list.

use rownode_core::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Text(Cow<'static, str>),
    Identifier(Vec<String>),
    Value(Value),
}

/// A composable piece of SQL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    parts: Vec<Part>,
}

/// Statement text plus its ordered parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Statement text with `$n` placeholders
    pub text: String,
    /// Parameter values; `values[i]` binds `$i+1`
    pub values: Vec<Value>,
}

impl SqlFragment {
    /// Empty fragment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Literal SQL text. Only ever pass text written in source code.
    pub fn raw(text: &'static str) -> Self {
        Self {
            parts: vec![Part::Text(Cow::Borrowed(text))],
        }
    }

    /// Text generated by this crate from trusted inputs (numbers, keywords).
    pub(crate) fn trusted(text: String) -> Self {
        Self {
            parts: vec![Part::Text(Cow::Owned(text))],
        }
    }

    /// A (possibly qualified) identifier, e.g. `["app", "widgets"]` renders
    /// `"app"."widgets"`.
    pub fn identifier<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            parts: vec![Part::Identifier(
                names.iter().map(|n| n.as_ref().to_string()).collect(),
            )],
        }
    }

    /// A bound value
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            parts: vec![Part::Value(value.into())],
        }
    }

    /// Whether the fragment renders no text
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of bound values
    pub fn value_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Value(_)))
            .count()
    }

    /// Append another fragment
    pub fn push(mut self, other: SqlFragment) -> Self {
        self.parts.extend(other.parts);
        self
    }

    /// Append literal text
    pub fn push_raw(self, text: &'static str) -> Self {
        self.push(SqlFragment::raw(text))
    }

    /// Wrap in parentheses
    pub fn parenthesized(self) -> Self {
        SqlFragment::raw("(").push(self).push_raw(")")
    }

    /// Join fragments with a literal separator
    pub fn join(fragments: impl IntoIterator<Item = SqlFragment>, separator: &'static str) -> Self {
        let mut out = SqlFragment::empty();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                out = out.push_raw(separator);
            }
            out = out.push(fragment);
        }
        out
    }

    /// Render text with positional placeholders and collect parameters
    pub fn compile(&self) -> CompiledQuery {
        let mut text = String::new();
        let mut values = Vec::new();
        for part in &self.parts {
            match part {
                Part::Text(t) => text.push_str(t),
                Part::Identifier(names) => {
                    for (i, name) in names.iter().enumerate() {
                        if i > 0 {
                            text.push('.');
                        }
                        text.push_str(&quote_identifier(name));
                    }
                }
                Part::Value(v) => {
                    values.push(v.clone());
                    text.push('$');
                    text.push_str(&values.len().to_string());
                }
            }
        }
        CompiledQuery { text, values }
    }
}

/// Quote an identifier, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
