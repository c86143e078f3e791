//! Billing domain errors

use std::fmt;

use core_kernel::PortError;
use thiserror::Error;

/// The store interaction that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Reading bills or aggregates for a summary
    Retrieve,
    /// Appending a new bill
    Save,
    /// Aggregating a peer group for a comparison
    Analyze,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::Retrieve => "retrieve",
            StoreOperation::Save => "save",
            StoreOperation::Analyze => "analyze",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// One or more required bill fields were absent or empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// One or more required comparison parameters were absent or empty
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    /// Text values the store cannot hold; PostgreSQL rejects U+0000 in text and jsonb
    #[error("Unsupported NUL character in fields: {}", .0.join(", "))]
    UnsupportedText(Vec<String>),

    /// The store failed; no retry is attempted
    #[error("Store failed to {operation}: {source}")]
    Storage {
        operation: StoreOperation,
        #[source]
        source: PortError,
    },
}

impl BillingError {
    /// Builds a mapper that wraps a port error as a storage failure of `operation`
    pub fn storage(operation: StoreOperation) -> impl FnOnce(PortError) -> Self {
        move |source| BillingError::Storage { operation, source }
    }

    /// Returns true if the caller supplied incomplete input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BillingError::MissingField(_)
                | BillingError::MissingParameter(_)
                | BillingError::UnsupportedText(_)
        )
    }

    /// The failing store operation, if this is a storage error
    pub fn operation(&self) -> Option<StoreOperation> {
        match self {
            BillingError::Storage { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
