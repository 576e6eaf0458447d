//! Condominium Backend API
//!
//! Typed client for the remote REST API the dashboard is built on.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login` - Exchange credentials for a bearer token and roles
//! - `POST /auth/register` - Create an account (201)
//!
//! ## Expenses
//! - `GET /expenses` - List expenses
//! - `POST /expenses` - Create an expense (server assigns the id)
//! - `DELETE /expenses/:id` - Delete an expense (204)
//!
//! ## Directories
//! - `GET /users`, `DELETE /users/:id`
//! - `GET /residents`
//! - `GET /shopOwners`
//! - `GET /notifications`
//!
//! Every call except login and register sends `Authorization: Bearer <token>`
//! from the attached [`Session`]. The user, resident and shop-owner
//! directories additionally require the `ROLE_ADMIN` role; the dashboard
//! summary does not.
//!
//! # Example
//!
//! ```rust,no_run
//! use condo::api::{ApiClient, SessionStore};
//! use condo::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SessionStore::new("/tmp/condo-session.json");
//!     let client = ApiClient::new(&ApiConfig::default())?;
//!
//!     let session = client.login("sindico", "s3cret").await?;
//!     store.save(&session)?;
//!
//!     let client = client.with_session(session);
//!     for expense in client.fetch_expenses().await? {
//!         println!("{} {:.2}", expense.description, expense.amount);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use dto::{
    DashboardSummary, Expense, LoginResponse, NewExpense, Notification, RegisterRequest,
    Resident, ShopOwner, User, Validate,
};
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionError, SessionStore, ADMIN_ROLE};

use async_trait::async_trait;

/// The expense endpoints, as a seam for the ledger and the import pipeline
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// Authoritative list of expenses
    async fn fetch_expenses(&self) -> ClientResult<Vec<Expense>>;

    /// Create one expense and return the server's copy
    async fn create_expense(&self, expense: &NewExpense) -> ClientResult<Expense>;

    async fn delete_expense(&self, id: &str) -> ClientResult<()>;
}
