//! Reporting error types.

use thiserror::Error;

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// The store could not be read.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    /// The requested report parameters are not understood.
    #[error("Invalid report parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportingError>;
