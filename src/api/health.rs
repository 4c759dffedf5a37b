//! Health check endpoints for Kubernetes liveness and readiness checks

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::AssessmentService;

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub dependencies: DependencyHealth,
}

#[derive(Serialize, ToSchema)]
pub struct DependencyHealth {
    /// Backend in use (`memory` or `postgres`)
    pub history_backend: String,
    pub history: String,
    /// `loaded` when a model file was read, `fallback` otherwise
    pub classifier: String,
}

/// Liveness check endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint
///
/// Returns 200 OK when the history store answers a ping. Classifier status is
/// informational only.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus),
        (status = 503, description = "Service is not ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(service: web::Data<AssessmentService>) -> impl Responder {
    let history_healthy = service.history_healthy().await;
    if history_healthy {
        tracing::debug!("History store health check passed");
    }

    let classifier_status = if service.classifier_loaded() {
        "loaded"
    } else {
        "fallback"
    };

    let status = ReadinessStatus {
        status: if history_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: DependencyHealth {
            history_backend: service.history_backend().to_string(),
            history: if history_healthy { "healthy" } else { "unhealthy" }.to_string(),
            classifier: classifier_status.to_string(),
        },
    };

    if history_healthy {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}
