//! Query Object - predicate sink and value utilities for report-filter
//!
//! This crate provides the collaborators the operator registry builds on:
//! a query builder that accumulates WHERE predicates, quoting helpers for
//! embedding user values, calendar arithmetic, and value validators.

pub mod dates;
pub mod prelude;
pub mod query_builder;
pub mod quoting;
pub mod validation;

pub use dates::{Clock, FixedClock, SystemClock};
pub use query_builder::{Predicate, PredicateSink, QueryBuilder};
pub use validation::{ValidationError, Validator};
