//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::{assessment, auth, health, resources};
use crate::model::{
    AssessmentRecord, AssessmentResult, FeatureAssessmentRequest, LoginRequest, Priority,
    ProbabilityOutcome, ProbabilityResult, RecommendationRecord, RegisterRequest, RiskOutcome,
    RiskResult, SymptomAssessmentRequest, UserProfile,
};
use crate::service::assistant::EducationalResource;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Breast Cancer Risk Assessment API",
        description = "Symptom and tumor-measurement risk scoring with recommendations"
    ),
    paths(
        resources::home,
        health::liveness,
        health::readiness,
        auth::register,
        auth::login,
        auth::check_auth,
        assessment::predict_symptom_based,
        assessment::predict_technical,
        assessment::prediction_history,
        resources::ai_assistance,
        resources::list_educational_resources,
    ),
    components(schemas(
        SymptomAssessmentRequest,
        FeatureAssessmentRequest,
        AssessmentRecord,
        AssessmentResult,
        RiskResult,
        ProbabilityResult,
        RiskOutcome,
        ProbabilityOutcome,
        RecommendationRecord,
        Priority,
        RegisterRequest,
        LoginRequest,
        UserProfile,
        EducationalResource,
        ErrorResponse,
        auth::MessageResponse,
        auth::LoginResponse,
        auth::AuthStatusResponse,
        resources::ServiceBanner,
        resources::AssistanceRequest,
        resources::AssistanceResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth,
    )),
    tags(
        (name = "assessment", description = "Risk scoring and history"),
        (name = "auth", description = "Registration and bearer tokens"),
        (name = "resources", description = "Assistant and educational content"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
