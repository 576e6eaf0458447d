//! Expense totals behind the dashboard charts: per category and per day.

use crate::api::Expense;
use crate::import::parse_date;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sum of amounts per description, in order of first appearance
pub fn totals_by_category(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|(d, _)| *d == expense.description) {
            Some((_, sum)) => *sum += expense.amount,
            None => totals.push((expense.description.clone(), expense.amount)),
        }
    }

    totals
}

/// Sum of amounts per UTC calendar day, oldest first.
/// Expenses whose date does not parse are left out.
pub fn totals_by_day(expenses: &[Expense]) -> Vec<(NaiveDate, f64)> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for expense in expenses {
        match parse_date(&expense.date) {
            Ok(dt) => *totals.entry(dt.date_naive()).or_insert(0.0) += expense.amount,
            Err(_) => tracing::debug!(id = %expense.id, date = %expense.date, "Skipping undated expense"),
        }
    }

    totals.into_iter().collect()
}
