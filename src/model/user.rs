use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User key used for callers that present no token when anonymous access is enabled
pub const ANONYMOUS_USER: &str = "anonymous";

/// Public view of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Bearer token issued at login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Who is making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// Holder of a valid token, keyed by email
    User(String),
    Anonymous,
}

impl CallerIdentity {
    /// Key under which this caller's history is stored
    pub fn user_key(&self) -> &str {
        match self {
            CallerIdentity::User(email) => email,
            CallerIdentity::Anonymous => ANONYMOUS_USER,
        }
    }
}
