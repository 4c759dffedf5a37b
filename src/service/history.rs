//! Per-user assessment history

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::DbError;
use crate::model::AssessmentRecord;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Append-only log of assessment results keyed by user
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, user: &str, record: &AssessmentRecord) -> Result<(), HistoryError>;

    /// All records for `user`, oldest first
    async fn list(&self, user: &str) -> Result<Vec<AssessmentRecord>, HistoryError>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<(), HistoryError>;

    fn backend_name(&self) -> &'static str;
}

/// History held in process memory; lost on restart
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<HashMap<String, Vec<AssessmentRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, user: &str, record: &AssessmentRecord) -> Result<(), HistoryError> {
        self.records
            .write()
            .await
            .entry(user.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list(&self, user: &str) -> Result<Vec<AssessmentRecord>, HistoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), HistoryError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentResult, ProbabilityOutcome, ProbabilityResult};
    use serde_json::json;

    fn record(malignant: f64) -> AssessmentRecord {
        AssessmentRecord::new(
            "ada@example.com",
            json!({ "radiusMean": malignant / 5.0 }),
            AssessmentResult::Technical(ProbabilityResult {
                malignant_probability: malignant,
                benign_probability: 100.0 - malignant,
                outcome: ProbabilityOutcome::Benign,
                preventions: vec![],
            }),
        )
    }

    #[tokio::test]
    async fn test_records_are_kept_per_user_in_order() {
        let store = InMemoryHistoryStore::new();
        let first = record(10.0);
        let second = record(20.0);

        store.append("ada@example.com", &first).await.unwrap();
        store.append("bob@example.com", &record(30.0)).await.unwrap();
        store.append("ada@example.com", &second).await.unwrap();

        let history = store.list("ada@example.com").await.unwrap();
        assert_eq!(history, vec![first, second]);
        assert_eq!(store.list("bob@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_has_empty_history() {
        let store = InMemoryHistoryStore::new();
        assert!(store.list("nobody").await.unwrap().is_empty());
        assert!(store.ping().await.is_ok());
    }
}
