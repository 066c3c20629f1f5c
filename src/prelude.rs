//! Convenience re-exports for common report-filter usage
//!
//! # Example
//!
//! ```rust
//! use report_filter::prelude::*;
//!
//! let operator = operator_for("t-")?;
//! assert_eq!(operator.arity(), Arity::Fixed(1));
//! # Ok::<(), ReportFilterError>(())
//! ```

// Registry
pub use crate::core::{OperatorRegistry, OperatorSettings, find, init_registry, load, operator_for};
pub use crate::errors::ReportFilterError;

// Operators
pub use crate::operator::{Arity, Behavior, Context, Modification, Operator, OperatorDescriptor, OperatorOptions, Signature};

// Re-export centralized config
pub use config::{AppConfig, OperatorConfig};

// Query building and value utilities
pub use query_object::prelude::*;
