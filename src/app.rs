//! Application state and service initialization
//!
//! This module centralizes service construction and dependency injection so
//! the HTTP server and the tests wire handlers the same way.

use std::sync::Arc;

use actix_web::web;

use crate::db::repository::{AssessmentHistoryRepository, UserRepository};
use crate::model::config::{AuthConfig, ClassifierConfig};
use crate::model::{Config, HistoryBackend};
use crate::service::{
    AssessmentService, ClassifierPort, HistoryStore, IdentityProvider, InMemoryHistoryStore,
    InMemoryUserStore, LogisticClassifier, TokenIdentityProvider, UserStore,
};

/// Application state shared by all workers
#[derive(Clone)]
pub struct AppState {
    /// Scoring and history service
    pub assessment_service: web::Data<AssessmentService>,
    /// Registration, login and token lookup
    pub identity: web::Data<dyn IdentityProvider>,
    /// Authentication policy
    pub auth: web::Data<AuthConfig>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Classifier loading (optional, falls back to the formula)
    /// 2. History and user store selection, with database setup for PostgreSQL
    /// 3. Identity provider construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let classifier = Self::build_classifier(&config.classifier);
        let (history, users) = Self::build_stores(config.history.backend).await?;
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(TokenIdentityProvider::new(users, config.auth.token_ttl_hours));

        Ok(Self::from_parts(classifier, history, identity, config.auth))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        classifier: Option<Arc<dyn ClassifierPort>>,
        history: Arc<dyn HistoryStore>,
        identity: Arc<dyn IdentityProvider>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            assessment_service: web::Data::new(AssessmentService::new(classifier, history)),
            identity: web::Data::from(identity),
            auth: web::Data::new(auth),
        }
    }

    /// Register the shared state on an actix service config
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.assessment_service.clone())
            .app_data(self.identity.clone())
            .app_data(self.auth.clone());
    }

    fn build_classifier(config: &ClassifierConfig) -> Option<Arc<dyn ClassifierPort>> {
        let path = config.model_path.as_ref()?;

        match LogisticClassifier::from_file(path) {
            Ok(classifier) => {
                tracing::info!(
                    path = %path,
                    width = classifier.input_width(),
                    "Classifier model loaded"
                );
                Some(Arc::new(classifier))
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Classifier unavailable, using fallback formula");
                None
            }
        }
    }

    /// History and accounts always live on the same backend
    async fn build_stores(
        backend: HistoryBackend,
    ) -> Result<(Arc<dyn HistoryStore>, Arc<dyn UserStore>), AppError> {
        match backend {
            HistoryBackend::Memory => {
                let history: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
                let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
                Ok((history, users))
            }
            HistoryBackend::Postgres => {
                let pool = crate::db::create_pool()
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                crate::db::init_schema(&pool)
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                let history: Arc<dyn HistoryStore> =
                    Arc::new(AssessmentHistoryRepository::new(pool.clone()));
                let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool));
                Ok((history, users))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),
}
