//! Assessment orchestration: score, stamp, record

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::model::{
    AssessmentRecord, AssessmentResult, CallerIdentity, FeatureAssessmentRequest,
    SymptomAssessmentRequest,
};
use crate::service::classifier::ClassifierPort;
use crate::service::history::{HistoryError, HistoryStore};
use crate::service::scoring::{InvalidInputError, score_features, score_symptoms};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssessmentServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("History unavailable: {0}")]
    History(#[from] HistoryError),
}

/// Runs the scorers and keeps each caller's history
pub struct AssessmentService {
    classifier: Option<Arc<dyn ClassifierPort>>,
    history: Arc<dyn HistoryStore>,
}

impl AssessmentService {
    pub fn new(classifier: Option<Arc<dyn ClassifierPort>>, history: Arc<dyn HistoryStore>) -> Self {
        tracing::info!(
            classifier = classifier.is_some(),
            history = history.backend_name(),
            "Assessment service initialized"
        );

        Self {
            classifier,
            history,
        }
    }

    pub async fn assess_symptoms(
        &self,
        caller: &CallerIdentity,
        request: &SymptomAssessmentRequest,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let result = score_symptoms(request)?;
        Ok(self
            .record(caller, request, AssessmentResult::SymptomBased(result))
            .await)
    }

    pub async fn assess_features(
        &self,
        caller: &CallerIdentity,
        request: &FeatureAssessmentRequest,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let result = score_features(request, self.classifier.as_deref())?;
        Ok(self
            .record(caller, request, AssessmentResult::Technical(result))
            .await)
    }

    /// The caller's stored assessments. Anonymous callers have none.
    pub async fn history(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        match caller {
            CallerIdentity::User(email) => Ok(self.history.list(email).await?),
            CallerIdentity::Anonymous => Ok(Vec::new()),
        }
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn history_backend(&self) -> &'static str {
        self.history.backend_name()
    }

    pub async fn history_healthy(&self) -> bool {
        match self.history.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "History store health check failed");
                false
            }
        }
    }

    /// Stamp a result and, for identified callers, append it to their history.
    /// A storage failure is logged and the result is still returned.
    async fn record<R: Serialize>(
        &self,
        caller: &CallerIdentity,
        request: &R,
        result: AssessmentResult,
    ) -> AssessmentRecord {
        let input_data = serde_json::to_value(request).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to capture assessment input");
            Value::Null
        });
        let record = AssessmentRecord::new(caller.user_key(), input_data, result);

        let CallerIdentity::User(email) = caller else {
            tracing::debug!(
                id = %record.id,
                assessment_type = record.result.type_name(),
                "Anonymous assessment not recorded"
            );
            return record;
        };

        match self.history.append(email, &record).await {
            Ok(()) => {
                tracing::info!(
                    id = %record.id,
                    user = %email,
                    assessment_type = record.result.type_name(),
                    "Assessment recorded"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    id = %record.id,
                    user = %email,
                    "Failed to persist assessment"
                );
            }
        }

        record
    }
}
