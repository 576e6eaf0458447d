//! Record Validator
//!
//! Checks that a [`RawRecord`] carries every column an expense needs.

use super::error::{ImportError, ImportResult};
use super::parser::RawRecord;

/// A validated but not yet normalized expense row
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub row: usize,
    pub description: String,
    pub amount_text: String,
    pub date_text: String,
}

/// Column names that hold each expense field
#[derive(Debug, Clone)]
pub struct ExpenseSchema {
    pub description: String,
    pub amount: String,
    pub date: String,
}

impl Default for ExpenseSchema {
    fn default() -> Self {
        Self {
            description: "description".to_string(),
            amount: "amount".to_string(),
            date: "date".to_string(),
        }
    }
}

impl ExpenseSchema {
    /// Validate one record, naming the first missing or blank column
    pub fn validate(&self, record: &RawRecord) -> ImportResult<ExpenseDraft> {
        Ok(ExpenseDraft {
            row: record.row,
            description: required(record, &self.description)?,
            amount_text: required(record, &self.amount)?,
            date_text: required(record, &self.date)?,
        })
    }
}

fn required(record: &RawRecord, column: &str) -> ImportResult<String> {
    match record.get(column).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ImportError::Validation {
            row: record.row,
            field: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(row: usize, pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            row,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_valid_record() {
        let rec = record(
            2,
            &[
                ("description", " Condomínio "),
                ("amount", "R$ 450,00"),
                ("date", "2024-02-05"),
                ("unit", "101"),
            ],
        );

        let draft = ExpenseSchema::default().validate(&rec).unwrap();
        assert_eq!(draft.row, 2);
        assert_eq!(draft.description, "Condomínio");
        assert_eq!(draft.amount_text, "R$ 450,00");
        assert_eq!(draft.date_text, "2024-02-05");
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let rec = record(4, &[("description", "Internet")]);

        match ExpenseSchema::default().validate(&rec) {
            Err(ImportError::Validation { row, field }) => {
                assert_eq!(row, 4);
                assert_eq!(field, "amount");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let rec = record(
            0,
            &[("description", "   "), ("amount", "1"), ("date", "2024-01-01")],
        );

        assert!(matches!(
            ExpenseSchema::default().validate(&rec),
            Err(ImportError::Validation { ref field, .. }) if field == "description"
        ));
    }

    #[test]
    fn test_custom_column_names() {
        let schema = ExpenseSchema {
            description: "descricao".into(),
            amount: "valor".into(),
            date: "data".into(),
        };
        let rec = record(
            0,
            &[("descricao", "Luz"), ("valor", "10"), ("data", "2024-01-01")],
        );

        assert_eq!(schema.validate(&rec).unwrap().description, "Luz");
    }
}
