//! Error types for the report-filter crate
//!
//! This module contains all error types that can be returned by operator lookup
//! and operator application.

use query_object::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportFilterError {
    #[error("Operator {0:?} not defined")]
    OperatorNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ReportFilterError {
    /// The caller supplied bad values rather than asking for a missing operator
    pub fn is_validation(&self) -> bool {
        matches!(self, ReportFilterError::Validation(_))
    }
}
