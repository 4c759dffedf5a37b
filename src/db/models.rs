//! Database models for accounts and assessment history

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::model::AssessmentRecord;
use crate::service::identity::StoredUser;

/// Database representation of an account
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub email: String,
    pub name: String,
    pub salt: String,
    pub password_hash: String,
}

impl From<StoredUser> for UserRow {
    fn from(user: StoredUser) -> Self {
        Self {
            email: user.email,
            name: user.name,
            salt: user.salt,
            password_hash: user.password_hash,
        }
    }
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self {
            name: row.name,
            email: row.email,
            salt: row.salt,
            password_hash: row.password_hash,
        }
    }
}

/// Database representation of a stored assessment
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentRow {
    pub id: String,
    pub user_id: String,
    pub assessment_type: String,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl AssessmentRow {
    pub fn from_domain(user_id: &str, record: &AssessmentRecord) -> Result<Self, String> {
        let payload = serde_json::to_value(record)
            .map_err(|e| format!("Failed to serialize assessment {}: {}", record.id, e))?;

        Ok(Self {
            id: record.id.to_string(),
            user_id: user_id.to_string(),
            assessment_type: record.result.type_name().to_string(),
            created_at: record.timestamp,
            payload,
        })
    }

    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<AssessmentRecord, String> {
        let record: AssessmentRecord = serde_json::from_value(self.payload)
            .map_err(|e| format!("Invalid payload for assessment {}: {}", self.id, e))?;

        if record.result.type_name() != self.assessment_type {
            return Err(format!(
                "Assessment {} stored as {} but payload is {}",
                self.id,
                self.assessment_type,
                record.result.type_name()
            ));
        }

        Ok(record)
    }
}
