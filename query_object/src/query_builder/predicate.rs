//! Predicate types
//!
//! A predicate is one boolean WHERE fragment. It is either raw SQL that was
//! already escaped by its producer, or a template whose `%s` placeholders are
//! filled with escaped arguments when the clause is rendered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single WHERE fragment appended by an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Pre-escaped SQL fragment, embedded verbatim
    Raw(String),
    /// `%s` template plus positional arguments, escaped at render time
    Template { template: String, args: Vec<Value> },
}

impl Predicate {
    /// Raw fragment
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// Template with positional arguments
    pub fn template(template: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Template {
            template: template.into(),
            args,
        }
    }
}

impl From<String> for Predicate {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl From<&str> for Predicate {
    fn from(sql: &str) -> Self {
        Self::Raw(sql.to_string())
    }
}

/// Anything that accumulates predicates.
///
/// This is the only capability operators need from a query; execution and
/// connection handling stay with the implementor.
pub trait PredicateSink {
    fn append(&mut self, predicate: Predicate);
}

impl PredicateSink for Vec<Predicate> {
    fn append(&mut self, predicate: Predicate) {
        self.push(predicate);
    }
}
