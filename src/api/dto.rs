//! Data Transfer Objects
//!
//! Records exchanged with the condominium backend. Responses are decoded into
//! these types and then checked with [`Validate`]; anything that does not fit
//! is rejected at the boundary instead of travelling further as loose JSON.

use crate::import::parse_date;
use serde::{Deserialize, Deserializer, Serialize};

/// Boundary check applied to every decoded response record
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Backend ids are opaque; accept JSON strings and numbers alike
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn require_id(kind: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        Err(format!("{} without id", kind))
    } else {
        Ok(())
    }
}

// ============================================
// AUTH DTOs
// ============================================

/// `POST /auth/login` body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub roles: Vec<String>,
}

impl Validate for LoginResponse {
    fn validate(&self) -> Result<(), String> {
        if self.token.trim().is_empty() {
            return Err("login response without token".to_string());
        }
        if self.roles.is_empty() {
            return Err("login response without roles".to_string());
        }
        Ok(())
    }
}

/// `POST /auth/register` body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl RegisterRequest {
    /// Self-service sign-up always asks for the plain user role
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            roles: vec!["ROLE_USER".to_string()],
        }
    }
}

// ============================================
// EXPENSE DTOs
// ============================================

/// A server-confirmed expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub description: String,
    pub amount: f64,
    /// ISO-8601 timestamp
    pub date: String,
}

impl Validate for Expense {
    fn validate(&self) -> Result<(), String> {
        require_id("expense", &self.id)?;
        if !self.amount.is_finite() {
            return Err(format!("expense {} has a non-finite amount", self.id));
        }
        parse_date(&self.date)
            .map(|_| ())
            .map_err(|_| format!("expense {} has an invalid date {:?}", self.id, self.date))
    }
}

/// Normalized payload for `POST /expenses`; the server assigns the id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    /// ISO-8601 timestamp
    pub date: String,
}

// ============================================
// DIRECTORY DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Validate for User {
    fn validate(&self) -> Result<(), String> {
        require_id("user", &self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resident {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub address: String,
}

impl Validate for Resident {
    fn validate(&self) -> Result<(), String> {
        require_id("resident", &self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopOwner {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub address: String,
}

impl Validate for ShopOwner {
    fn validate(&self) -> Result<(), String> {
        require_id("shop owner", &self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub message: String,
}

impl Validate for Notification {
    fn validate(&self) -> Result<(), String> {
        require_id("notification", &self.id)
    }
}

/// Everything the dashboard needs, fetched together
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub expenses: Vec<Expense>,
    pub residents: Vec<Resident>,
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_numeric_id() {
        let expense: Expense = serde_json::from_str(
            r#"{"id": 42, "description": "Internet", "amount": 99.9, "date": "2024-01-15T00:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(expense.id, "42");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_expense_shape_mismatch_is_rejected() {
        let result: Result<Expense, _> =
            serde_json::from_str(r#"{"id": "a1", "description": "Internet", "amount": "99"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_expense_bad_date_fails_validation() {
        let expense = Expense {
            id: "a1".into(),
            description: "Internet".into(),
            amount: 10.0,
            date: "ontem".into(),
        };
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_login_response_requires_roles() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token": "abc", "roles": []}"#).unwrap();
        assert!(response.validate().is_err());
    }

    #[test]
    fn test_register_request_default_role() {
        let body = serde_json::to_value(RegisterRequest::new("ana", "ana@example.com", "s3cret"))
            .unwrap();
        assert_eq!(body["roles"], serde_json::json!(["ROLE_USER"]));
    }

    #[test]
    fn test_user_without_roles() {
        let user: User =
            serde_json::from_str(r#"{"id": "u1", "username": "ana", "email": "ana@example.com"}"#)
                .unwrap();
        assert!(user.roles.is_empty());
        assert!(user.validate().is_ok());
    }
}
