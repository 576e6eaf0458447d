//! # Condo
//!
//! Client toolkit for a condominium management backend: expenses, residents,
//! shops, users and notifications, with bulk expense import from CSV.
//!
//! ## Modules
//!
//! - [`api`]: Typed REST client, DTOs and the persisted auth session
//! - [`import`]: CSV parsing, validation, normalization and ordered submission
//! - [`expenses`]: Expense collection, ledger, list presenter and totals
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: Top-level error type and localized user messages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use condo::api::ApiClient;
//! use condo::config::Config;
//! use condo::expenses::{ExpenseLedger, ListPresenter, SortField};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let client = ApiClient::new(&config.api)?;
//!     let session = client.login("sindico", "s3cret").await?;
//!
//!     let mut ledger = ExpenseLedger::new(client.with_session(session));
//!     let created = ledger
//!         .import_csv("description,amount,date\nInternet,\"R$ 99,90\",2024-01-10\n")
//!         .await?;
//!     println!("Imported {} expenses", created);
//!
//!     let mut presenter = ListPresenter::new(config.listing.page_size);
//!     presenter.select_sort(SortField::Date);
//!     for expense in presenter.view(ledger.expenses().as_slice()).items {
//!         println!("{} {:.2}", expense.description, expense.amount);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod expenses;
pub mod import;

pub use error::{AppError, AppResult, Screen};
