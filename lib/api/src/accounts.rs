use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use tripgraph_storage::{CredentialStore, SessionStore, StorageError, User};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Registration and session-based login over injected stores.
#[derive(Clone)]
pub struct AccountService {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
}

impl AccountService {
    pub fn new(credentials: Arc<dyn CredentialStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { credentials, sessions }
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<User> {
        let (Some(username), Some(email), Some(password)) = (
            present(&request.username),
            present(&request.email),
            present(&request.password),
        ) else {
            return Err(ApiError::BadRequest("All fields required".to_string()));
        };

        match self.credentials.register(username, email, password) {
            Ok(user) => {
                info!("Registered user {}", user.email);
                Ok(user)
            }
            Err(e @ (StorageError::MissingFields | StorageError::EmailTaken)) => {
                Err(ApiError::BadRequest(e.to_string()))
            }
            Err(e) => {
                error!("Registration failed: {}", e);
                Err(ApiError::Internal)
            }
        }
    }

    /// Verify credentials and open a session. Returns the session token.
    pub fn login(&self, request: &LoginRequest) -> Result<(String, User)> {
        let (Some(email), Some(password)) = (present(&request.email), present(&request.password)) else {
            return Err(ApiError::BadRequest("Email and password required".to_string()));
        };

        match self.credentials.verify(email, password) {
            Ok(Some(user)) => {
                let token = self.sessions.create(user.clone());
                info!("User {} logged in", user.email);
                Ok((token, user))
            }
            Ok(None) => Err(ApiError::Unauthorized("Invalid credentials".to_string())),
            Err(e) => {
                error!("Credential check failed: {}", e);
                Err(ApiError::Internal)
            }
        }
    }

    pub fn status(&self, token: Option<&str>) -> SessionStatus {
        match token.and_then(|t| self.sessions.get(t)) {
            Some(user) => SessionStatus {
                logged_in: true,
                username: Some(user.username),
                email: Some(user.email),
            },
            None => SessionStatus {
                logged_in: false,
                username: None,
                email: None,
            },
        }
    }

    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.sessions.remove(token);
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
