//! PostgreSQL-backed accounts and assessment history

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbError;
use super::models::{AssessmentRow, UserRow};
use crate::model::AssessmentRecord;
use crate::service::history::{HistoryError, HistoryStore};
use crate::service::identity::{IdentityError, StoredUser, UserStore};

/// Repository for assessment history operations
#[derive(Clone)]
pub struct AssessmentHistoryRepository {
    pool: PgPool,
}

impl AssessmentHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an assessment record
    pub async fn insert(&self, user_id: &str, record: &AssessmentRecord) -> Result<(), DbError> {
        let row = AssessmentRow::from_domain(user_id, record).map_err(DbError::Serialization)?;

        sqlx::query(
            r#"
            INSERT INTO assessment_history (id, user_id, assessment_type, created_at, payload)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.assessment_type)
        .bind(row.created_at)
        .bind(&row.payload)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, user = %row.user_id, "Inserted assessment record");
        Ok(())
    }

    /// List a user's assessment records in insertion order
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<AssessmentRecord>, DbError> {
        let rows: Vec<AssessmentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, assessment_type, created_at, payload
            FROM assessment_history
            WHERE user_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.into_domain() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable assessment record");
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl HistoryStore for AssessmentHistoryRepository {
    async fn append(&self, user: &str, record: &AssessmentRecord) -> Result<(), HistoryError> {
        Ok(self.insert(user, record).await?)
    }

    async fn list(&self, user: &str) -> Result<Vec<AssessmentRecord>, HistoryError> {
        Ok(self.list_for_user(user).await?)
    }

    async fn ping(&self) -> Result<(), HistoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an account; returns false when the email is already registered
    pub async fn insert_if_absent(&self, user: StoredUser) -> Result<bool, DbError> {
        let row = UserRow::from(user);

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name, salt, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&row.email)
        .bind(&row.name)
        .bind(&row.salt)
        .bind(&row.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, DbError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT email, name, salt, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredUser::from))
    }
}

impl From<DbError> for IdentityError {
    fn from(err: DbError) -> Self {
        IdentityError::Storage(err.to_string())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: StoredUser) -> Result<(), IdentityError> {
        if self.insert_if_absent(user).await? {
            Ok(())
        } else {
            Err(IdentityError::UserExists)
        }
    }

    async fn find(&self, email: &str) -> Result<Option<StoredUser>, IdentityError> {
        Ok(self.find_by_email(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentResult, RiskOutcome, RiskResult};

    #[tokio::test]
    #[ignore] // Requires a running PostgreSQL instance
    async fn test_insert_and_list() {
        let pool = crate::db::create_pool().await.unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        let repository = AssessmentHistoryRepository::new(pool);

        let user = format!("test-{}@example.com", uuid::Uuid::new_v4());
        let record = AssessmentRecord::new(
            user.clone(),
            serde_json::json!({ "age": 60 }),
            AssessmentResult::SymptomBased(RiskResult {
                risk_percentage: 42.0,
                outcome: RiskOutcome::ModerateRisk,
                preventions: vec![],
            }),
        );

        repository.insert(&user, &record).await.unwrap();
        let history = repository.list_for_user(&user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, record.id);
    }

    #[tokio::test]
    #[ignore] // Requires a running PostgreSQL instance
    async fn test_users_survive_a_new_repository() {
        let pool = crate::db::create_pool().await.unwrap();
        crate::db::init_schema(&pool).await.unwrap();

        let email = format!("test-{}@example.com", uuid::Uuid::new_v4());
        let user = StoredUser {
            name: "Ada".to_string(),
            email: email.clone(),
            salt: "salt".to_string(),
            password_hash: "hash".to_string(),
        };

        let first = UserRepository::new(pool.clone());
        assert!(UserStore::insert(&first, user.clone()).await.is_ok());

        let second = UserRepository::new(pool);
        assert_eq!(
            UserStore::insert(&second, user.clone()).await,
            Err(IdentityError::UserExists)
        );
        assert_eq!(second.find_by_email(&email).await.unwrap(), Some(user));
    }
}
