//! Error type for loading inputs and exporting results
//!
//! The amortization engine itself never fails; infeasible payoffs are
//! reported through [`crate::amortization::PayoffResult`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinancingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl FinancingError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FinancingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinancingError>;
