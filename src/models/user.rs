use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Logged-in user as returned by the auth server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    /// Credential to persist after login/register
    #[serde(default)]
    pub token: Option<String>,
}

/// Credentials submitted by the login and register forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
}

impl AuthForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject forms that cannot possibly succeed, without a round trip.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::validation("Please enter a user name"));
        }
        if self.password.is_empty() {
            return Err(AuthError::validation("Please enter a password"));
        }
        Ok(())
    }
}

/// Body of `me`, `login` and `register` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEnvelope {
    pub user: User,
}
