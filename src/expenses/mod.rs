//! Expenses
//!
//! Session-side expense state: the deduplicated collection, the ledger that
//! keeps it in step with the backend, the list presenter and the dashboard
//! totals.

pub mod collection;
pub mod ledger;
pub mod presenter;
pub mod totals;

pub use collection::ExpenseCollection;
pub use ledger::ExpenseLedger;
pub use presenter::{
    DescriptionFilter, ListPresenter, ListView, SortDirection, SortField, SortState,
};
pub use totals::{totals_by_category, totals_by_day};

/// Expense categories offered when creating or filtering expenses
pub const EXPENSE_TYPES: [&str; 6] = [
    "Conta de Água",
    "Conta de Luz",
    "Condomínio",
    "Internet",
    "Manutenção",
    "Outros",
];
