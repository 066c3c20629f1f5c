//! Convenience re-exports for common query-object usage

// Query building
pub use crate::query_builder::{Predicate, PredicateSink, QueryBuilder};

// Calendar
pub use crate::dates::{Clock, FixedClock, SystemClock};

// Quoting
pub use crate::quoting::{clean_currency, collection, quote_string, quoted_date, quoted_datetime};

// Validation
pub use crate::validation::{ValidationError, Validator};

// Common external dependencies that are frequently used
pub use serde_json::{json, Value};
