//! Import error types
//!
//! Every way a CSV import can stop, from malformed input to a rejected
//! create-request half way through the batch.

use crate::api::{ClientError, NewExpense};
use thiserror::Error;

/// Field-level normalization failures, carrying the raw value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Errors that abort a CSV import
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input could not be tokenized as delimited text
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required column is missing or blank on a row
    #[error("Row {row}: missing required field '{field}'")]
    Validation { row: usize, field: String },

    #[error("Row {row}: invalid date {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: invalid amount {value:?}")]
    InvalidAmount { row: usize, value: String },

    /// A create-request failed; earlier rows stay created on the server
    #[error("Import stopped at row {index} after {succeeded} created: {source}")]
    Submit {
        succeeded: usize,
        index: usize,
        payload: NewExpense,
        #[source]
        source: ClientError,
    },

    /// Every row was created but re-fetching the collection failed
    #[error("Imported {created} expenses but could not refresh the list: {source}")]
    Refresh {
        created: usize,
        #[source]
        source: ClientError,
    },
}

impl ImportError {
    /// Attach a row index to a normalization failure
    pub fn at_row(row: usize, err: NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidDate(value) => ImportError::InvalidDate { row, value },
            NormalizeError::InvalidAmount(value) => ImportError::InvalidAmount { row, value },
        }
    }

    /// Row index of the offending CSV row, if the error is row-specific
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::Validation { row, .. }
            | ImportError::InvalidDate { row, .. }
            | ImportError::InvalidAmount { row, .. } => Some(*row),
            ImportError::Submit { index, .. } => Some(*index),
            ImportError::Parse(_) | ImportError::Refresh { .. } => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

/// Result type alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::Validation {
            row: 3,
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "Row 3: missing required field 'amount'");
        assert_eq!(err.row(), Some(3));
    }

    #[test]
    fn test_at_row_keeps_raw_value() {
        let err = ImportError::at_row(7, NormalizeError::InvalidDate("ontem".into()));
        assert!(matches!(
            err,
            ImportError::InvalidDate { row: 7, ref value } if value == "ontem"
        ));
    }
}
