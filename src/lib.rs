//! # report-filter
//!
//! The operator layer of a reporting engine: named comparison operators that
//! turn a field and user-supplied values into WHERE predicates on a query under
//! construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use report_filter::prelude::*;
//!
//! let registry = report_filter::load();
//!
//! let query = registry.filter(QueryBuilder::new(), "~", "subject", &["Crash"])?;
//! let query = registry.filter(query, "=", "status_id", &["1", "2"])?;
//!
//! assert_eq!(
//!     query.build_where_clause(),
//!     "WHERE (LOWER(subject) LIKE '%crash%') AND (status_id IN ('1', '2'))"
//! );
//!
//! // Blank dates leave the query alone
//! let mut query = QueryBuilder::new();
//! let outcome = registry.apply("<>d", &mut query, "due_date", &["", "2024-01-01"])?;
//! assert!(outcome.is_unchanged());
//! assert!(query.is_empty());
//! # Ok::<(), ReportFilterError>(())
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

mod builtins;
pub mod core;
pub mod date_range;
pub mod errors;
pub mod operator;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::{OperatorRegistry, OperatorSettings, find, init_registry, load, operator_for};
pub use crate::errors::ReportFilterError;
pub use crate::operator::{Arity, Behavior, Context, Modification, Operator, OperatorDescriptor, OperatorOptions, Signature};

// Re-export centralized config
pub use config::{AppConfig, OperatorConfig};

// Re-export internal crates used in the public API
pub use query_object;
