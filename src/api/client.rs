//! Condominium REST API Client
//!
//! HTTP client for the condominium backend: auth, expenses and the
//! resident/user/shop-owner/notification directories.

use super::dto::{
    DashboardSummary, Expense, LoginRequest, LoginResponse, NewExpense, Notification,
    RegisterRequest, Resident, ShopOwner, User, Validate,
};
use super::error::{ClientError, ClientResult};
use super::session::Session;
use super::ExpenseApi;
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// REST client bound to one backend and one session
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a signed-out client
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("condo/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: Session::default(),
        })
    }

    /// Attach the session whose token authenticates later requests
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add the bearer header, or refuse without sending anything
    fn authorized(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.session.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Refuse directory calls for non-admin sessions without sending anything
    fn require_admin(&self) -> ClientResult<()> {
        if !self.session.is_authenticated() {
            Err(ClientError::NotAuthenticated)
        } else if !self.session.is_admin() {
            Err(ClientError::AdminOnly)
        } else {
            Ok(())
        }
    }

    async fn send(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(ClientError::from_transport)?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status.as_u16(), message))
        }
    }

    async fn decode<T>(response: Response) -> ClientResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidPayload(e.to_string()))?;
        value.validate().map_err(ClientError::InvalidPayload)?;
        Ok(value)
    }

    /// Authenticated GET of a list endpoint, validating every record
    async fn get_list<T>(&self, path: &str) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned + Validate,
    {
        tracing::debug!(path, "GET");
        let request = self.authorized(self.client.get(self.url(path)))?;
        let response = Self::send(request).await?;

        let items: Vec<T> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidPayload(format!("{}: {}", path, e)))?;

        for item in &items {
            item.validate()
                .map_err(|e| ClientError::InvalidPayload(format!("{}: {}", path, e)))?;
        }

        tracing::debug!(path, count = items.len(), "Fetched records");
        Ok(items)
    }

    // ============================================
    // Auth
    // ============================================

    /// Exchange credentials for a session. The caller decides whether to
    /// persist it and attach it to this client.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password });

        let response = Self::send(request).await?;
        let login: LoginResponse = Self::decode(response).await?;

        tracing::info!(username, role = ?login.roles.first(), "Logged in");
        Ok(Session::from_login(login.token, &login.roles))
    }

    /// Create an account. The confirmation is checked before anything is sent.
    pub async fn register(
        &self,
        request: &RegisterRequest,
        password_confirmation: &str,
    ) -> ClientResult<User> {
        if request.password != password_confirmation {
            return Err(ClientError::PasswordMismatch);
        }

        let request = self.client.post(self.url("/auth/register")).json(request);
        let response = Self::send(request).await?;

        if response.status() != StatusCode::CREATED {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                message: "expected 201 Created".to_string(),
            });
        }

        let user: User = Self::decode(response).await?;
        tracing::info!(username = %user.username, "Account created");
        Ok(user)
    }

    // ============================================
    // Expenses
    // ============================================

    pub async fn fetch_expenses(&self) -> ClientResult<Vec<Expense>> {
        self.get_list("/expenses").await
    }

    pub async fn create_expense(&self, expense: &NewExpense) -> ClientResult<Expense> {
        let request = self.authorized(self.client.post(self.url("/expenses")).json(expense))?;
        let created: Expense = Self::decode(Self::send(request).await?).await?;

        tracing::debug!(id = %created.id, description = %created.description, "Expense created");
        Ok(created)
    }

    pub async fn delete_expense(&self, id: &str) -> ClientResult<()> {
        let path = format!("/expenses/{}", urlencoding::encode(id));
        let request = self.authorized(self.client.delete(self.url(&path)))?;
        Self::send(request).await?;

        tracing::debug!(id, "Expense deleted");
        Ok(())
    }

    // ============================================
    // Directories
    // ============================================

    pub async fn fetch_users(&self) -> ClientResult<Vec<User>> {
        self.require_admin()?;
        self.get_list("/users").await
    }

    /// Delete a user; the backend signals success with 204 only
    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        self.require_admin()?;
        let path = format!("/users/{}", urlencoding::encode(id));
        let request = self.authorized(self.client.delete(self.url(&path)))?;
        let response = Self::send(request).await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                message: "expected 204 No Content".to_string(),
            });
        }
        Ok(())
    }

    pub async fn fetch_residents(&self) -> ClientResult<Vec<Resident>> {
        self.require_admin()?;
        self.get_list("/residents").await
    }

    pub async fn fetch_shop_owners(&self) -> ClientResult<Vec<ShopOwner>> {
        self.require_admin()?;
        self.get_list("/shopOwners").await
    }

    pub async fn fetch_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.get_list("/notifications").await
    }

    /// Fetch expenses, residents and notifications concurrently.
    /// Any single failure fails the whole summary. Open to every signed-in
    /// role, unlike the resident directory.
    pub async fn fetch_summary(&self) -> ClientResult<DashboardSummary> {
        let (expenses, residents, notifications) = tokio::try_join!(
            self.fetch_expenses(),
            self.get_list::<Resident>("/residents"),
            self.fetch_notifications(),
        )?;

        Ok(DashboardSummary {
            expenses,
            residents,
            notifications,
        })
    }
}

#[async_trait]
impl ExpenseApi for ApiClient {
    async fn fetch_expenses(&self) -> ClientResult<Vec<Expense>> {
        ApiClient::fetch_expenses(self).await
    }

    async fn create_expense(&self, expense: &NewExpense) -> ClientResult<Expense> {
        ApiClient::create_expense(self, expense).await
    }

    async fn delete_expense(&self, id: &str) -> ClientResult<()> {
        ApiClient::delete_expense(self, id).await
    }
}
