//! User registration and bearer-token sessions
//!
//! Tokens are opaque random identifiers looked up in a session table; they carry
//! no claims of their own. Accounts live in a [`UserStore`] so they can share a
//! database with the assessment history.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{LoginRequest, RegisterRequest, Session, UserProfile};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("All fields required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {} characters long", MIN_PASSWORD_LENGTH)]
    WeakPassword,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is missing")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("User store unavailable: {0}")]
    Storage(String),
}

/// Source of caller identities for the API
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account
    async fn register(&self, request: RegisterRequest) -> Result<UserProfile, IdentityError>;

    /// Verify credentials and issue a bearer token
    async fn login(&self, request: LoginRequest) -> Result<Session, IdentityError>;

    /// Resolve a bearer token to the user's email
    async fn authenticate(&self, token: &str) -> Result<String, IdentityError>;

    /// Look up a user's public profile
    async fn profile(&self, email: &str) -> Result<UserProfile, IdentityError>;
}

/// An account as persisted, with its salted password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub name: String,
    pub email: String,
    pub salt: String,
    pub password_hash: String,
}

impl StoredUser {
    fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Account storage keyed by email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Add an account. Fails with [`IdentityError::UserExists`] when the email is taken.
    async fn insert(&self, user: StoredUser) -> Result<(), IdentityError>;

    async fn find(&self, email: &str) -> Result<Option<StoredUser>, IdentityError>;
}

/// Accounts held in process memory; lost on restart
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: StoredUser) -> Result<(), IdentityError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(IdentityError::UserExists);
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<StoredUser>, IdentityError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    email: String,
    expires_at: DateTime<Utc>,
}

/// Identity provider with salted SHA-256 password hashes and in-memory sessions
pub struct TokenIdentityProvider {
    users: Arc<dyn UserStore>,
    sessions: RwLock<HashMap<String, SessionEntry>>,
    token_ttl: Duration,
    email_pattern: Regex,
}

impl TokenIdentityProvider {
    pub fn new(users: Arc<dyn UserStore>, token_ttl_hours: i64) -> Self {
        tracing::info!(token_ttl_hours = token_ttl_hours, "Token identity provider initialized");

        Self {
            users,
            sessions: RwLock::new(HashMap::new()),
            token_ttl: Duration::hours(token_ttl_hours),
            email_pattern: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
        }
    }

    fn validate(&self, request: &RegisterRequest) -> Result<(), IdentityError> {
        if request.name.trim().is_empty() || request.email.is_empty() || request.password.is_empty()
        {
            return Err(IdentityError::MissingFields);
        }
        if !self.email_pattern.is_match(&request.email) {
            return Err(IdentityError::InvalidEmail);
        }
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword);
        }
        Ok(())
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// SHA-256 of salt followed by password, hex encoded
fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn register(&self, request: RegisterRequest) -> Result<UserProfile, IdentityError> {
        self.validate(&request)?;

        let salt = Uuid::new_v4().simple().to_string();
        let user = StoredUser {
            name: request.name.trim().to_string(),
            email: request.email,
            password_hash: hash_password(&salt, &request.password),
            salt,
        };
        let profile = user.profile();
        self.users.insert(user).await?;

        tracing::info!(email = %profile.email, "User registered");
        Ok(profile)
    }

    async fn login(&self, request: LoginRequest) -> Result<Session, IdentityError> {
        if request.email.is_empty() || request.password.is_empty() {
            return Err(IdentityError::MissingFields);
        }

        let user = self
            .users
            .find(&request.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;
        if hash_password(&user.salt, &request.password) != user.password_hash {
            return Err(IdentityError::InvalidCredentials);
        }
        let profile = user.profile();

        let now = Utc::now();
        let token = Uuid::new_v4().simple().to_string();
        {
            let mut sessions = self.sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, entry| entry.expires_at > now);
            if sessions.len() < before {
                tracing::debug!(pruned = before - sessions.len(), "Expired sessions pruned");
            }
            sessions.insert(
                token.clone(),
                SessionEntry {
                    email: profile.email.clone(),
                    expires_at: now + self.token_ttl,
                },
            );
        }

        tracing::info!(email = %profile.email, "User logged in");
        Ok(Session {
            token,
            user: profile,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<String, IdentityError> {
        let entry = self
            .sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)?;

        if entry.expires_at <= Utc::now() {
            self.sessions.write().await.remove(token);
            tracing::debug!(email = %entry.email, "Expired session removed");
            return Err(IdentityError::TokenExpired);
        }

        if self.users.find(&entry.email).await?.is_none() {
            return Err(IdentityError::UserNotFound);
        }

        Ok(entry.email)
    }

    async fn profile(&self, email: &str) -> Result<UserProfile, IdentityError> {
        self.users
            .find(email)
            .await?
            .map(|user| user.profile())
            .ok_or(IdentityError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(token_ttl_hours: i64) -> TokenIdentityProvider {
        TokenIdentityProvider::new(Arc::new(InMemoryUserStore::new()), token_ttl_hours)
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_login_authenticate() {
        let provider = provider(24);
        let profile = provider
            .register(register_request("ada@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(profile.email, "ada@example.com");

        let session = provider
            .login(login_request("ada@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(session.user.name, "Ada");

        let email = provider.authenticate(&session.token).await.unwrap();
        assert_eq!(email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let provider = provider(24);
        assert_eq!(
            provider.register(register_request("", "password123")).await,
            Err(IdentityError::MissingFields)
        );
        assert_eq!(
            provider.register(register_request("not-an-email", "password123")).await,
            Err(IdentityError::InvalidEmail)
        );
        assert_eq!(
            provider.register(register_request("ada@example.com", "short")).await,
            Err(IdentityError::WeakPassword)
        );
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let provider = provider(24);
        provider
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(
            provider
                .register(register_request("ada@example.com", "password456"))
                .await,
            Err(IdentityError::UserExists)
        );
    }

    #[tokio::test]
    async fn test_accounts_outlive_the_provider() {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        TokenIdentityProvider::new(users.clone(), 24)
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();

        // a fresh provider over the same store, as after a restart
        let restarted = TokenIdentityProvider::new(users, 24);
        assert_eq!(
            restarted
                .register(register_request("ada@example.com", "takeover123"))
                .await,
            Err(IdentityError::UserExists)
        );
        assert!(
            restarted
                .login(login_request("ada@example.com", "password123"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let provider = provider(24);
        provider
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(
            provider.login(login_request("ada@example.com", "password124")).await.unwrap_err(),
            IdentityError::InvalidCredentials
        );
        assert_eq!(
            provider.login(login_request("bob@example.com", "password123")).await.unwrap_err(),
            IdentityError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_unknown_and_expired_tokens() {
        let provider = provider(0);
        provider
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();
        let session = provider
            .login(login_request("ada@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(
            provider.authenticate("bogus").await,
            Err(IdentityError::InvalidToken)
        );
        assert_eq!(
            provider.authenticate(&session.token).await,
            Err(IdentityError::TokenExpired)
        );
        // Expired sessions are dropped
        assert_eq!(
            provider.authenticate(&session.token).await,
            Err(IdentityError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_login_prunes_expired_sessions() {
        let provider = provider(0);
        provider
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();

        for _ in 0..5 {
            provider
                .login(login_request("ada@example.com", "password123"))
                .await
                .unwrap();
        }

        // only the session issued by the latest login survives
        assert_eq!(provider.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let provider = provider(24);
        provider
            .register(register_request("ada@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(
            provider.profile("ada@example.com").await.unwrap().name,
            "Ada"
        );
        assert_eq!(
            provider.profile("bob@example.com").await,
            Err(IdentityError::UserNotFound)
        );
    }
}
