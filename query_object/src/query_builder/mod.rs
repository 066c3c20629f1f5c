//! Query builder utilities
//!
//! This module provides the predicate sink operators write to and the SQL
//! rendering of accumulated predicates.

pub mod builder;
pub mod predicate;
pub mod sql_generation;

#[cfg(test)]
mod tests;

pub use builder::QueryBuilder;
pub use predicate::{Predicate, PredicateSink};
