//! Query builder utilities
//!
//! This module provides the in-memory query the operators append to.

use crate::query_builder::predicate::{Predicate, PredicateSink};
use crate::query_builder::sql_generation::SqlGenerator;

/// Query builder accumulating WHERE predicates, combined with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(crate) predicates: Vec<Predicate>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate
    pub fn where_predicate(mut self, predicate: impl Into<Predicate>) -> Self {
        self.append(predicate.into());
        self
    }

    /// Predicates in insertion order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Rendered SQL of every predicate
    pub fn conditions(&self) -> Vec<String> {
        SqlGenerator::build_conditions(&self.predicates)
    }

    /// Build WHERE clause
    pub fn build_where_clause(&self) -> String {
        SqlGenerator::build_where_clause(&self.predicates)
    }
}

impl PredicateSink for QueryBuilder {
    fn append(&mut self, predicate: Predicate) {
        #[cfg(feature = "debug-logging")]
        tracing::trace!("[QUERY] append predicate #{}: {:?}", self.predicates.len() + 1, predicate);
        self.predicates.push(predicate);
    }
}
