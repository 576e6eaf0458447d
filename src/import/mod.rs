//! CSV Expense Import
//!
//! Pipeline that turns an uploaded expense spreadsheet into created expenses:
//!
//! 1. [`RowParser`] streams header-keyed rows out of the CSV text
//! 2. [`ExpenseSchema`] checks each row has description, amount and date
//! 3. [`normalize`] converts the locale-formatted amount and date
//! 4. [`submit_in_order`] posts the payloads one by one
//!
//! Steps 1-3 run over the whole file before anything is sent, so a bad row
//! anywhere means no request at all. Once submission starts, rows already
//! created stay created if a later one is rejected.

mod error;
pub mod normalize;
mod parser;
mod submitter;
mod validator;

pub use error::{ImportError, ImportResult, NormalizeError};
pub use normalize::{normalize_date, normalize_draft, parse_amount, parse_date};
pub use parser::{RawRecord, RowParser};
pub use submitter::{submit_in_order, BatchFailure};
pub use validator::{ExpenseDraft, ExpenseSchema};

use crate::api::{Expense, ExpenseApi, NewExpense};

/// CSV import pipeline with configurable column names
#[derive(Debug, Clone, Default)]
pub struct ImportPipeline {
    schema: ExpenseSchema,
}

impl ImportPipeline {
    /// Create a pipeline for the standard `description,amount,date` layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different column names
    pub fn with_schema(mut self, schema: ExpenseSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Parse, validate and normalize every row, failing at the first bad one
    pub fn prepare(&self, text: &str) -> ImportResult<Vec<NewExpense>> {
        let mut payloads = Vec::new();

        for record in RowParser::new(text)? {
            let record = record?;
            let draft = self.schema.validate(&record)?;
            let payload =
                normalize_draft(&draft).map_err(|e| ImportError::at_row(draft.row, e))?;
            payloads.push(payload);
        }

        tracing::debug!(rows = payloads.len(), "CSV rows normalized");
        Ok(payloads)
    }

    /// Prepare the file, then create each expense in row order
    pub async fn run<A>(&self, api: &A, text: &str) -> ImportResult<Vec<Expense>>
    where
        A: ExpenseApi + ?Sized,
    {
        let payloads = self.prepare(text)?;
        tracing::info!(rows = payloads.len(), "Submitting imported expenses");

        submit_in_order(payloads, move |payload| async move {
            api.create_expense(&payload).await
        })
        .await
        .map_err(|failure| ImportError::Submit {
            succeeded: failure.succeeded(),
            index: failure.index,
            payload: failure.item,
            source: failure.error,
        })
    }
}
