//! REST API endpoints for risk assessments and prediction history

use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::api::auth::{caller, resolve_caller};
use crate::api::error::{ApiError, ErrorResponse};
use crate::model::config::AuthConfig;
use crate::model::{AssessmentRecord, FeatureAssessmentRequest, SymptomAssessmentRequest};
use crate::service::{AssessmentService, IdentityProvider};

/// Score a symptom questionnaire. Results of identified callers are stored.
#[utoipa::path(
    post,
    path = "/api/predict/symptom-based",
    request_body = SymptomAssessmentRequest,
    responses(
        (status = 200, description = "Risk assessment computed", body = AssessmentRecord),
        (status = 400, description = "Malformed numeric field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "assessment"
)]
#[post("/api/predict/symptom-based")]
pub async fn predict_symptom_based(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    identity: web::Data<dyn IdentityProvider>,
    auth: web::Data<AuthConfig>,
    body: web::Json<SymptomAssessmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller(&req, &identity, &auth).await?;
    let record = service.assess_symptoms(&caller, &body).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Score tumor measurements. Results of identified callers are stored.
#[utoipa::path(
    post,
    path = "/api/predict/technical",
    request_body = FeatureAssessmentRequest,
    responses(
        (status = 200, description = "Probability assessment computed", body = AssessmentRecord),
        (status = 400, description = "Malformed numeric field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "assessment"
)]
#[post("/api/predict/technical")]
pub async fn predict_technical(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    identity: web::Data<dyn IdentityProvider>,
    auth: web::Data<AuthConfig>,
    body: web::Json<FeatureAssessmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller(&req, &identity, &auth).await?;
    let record = service.assess_features(&caller, &body).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// List the caller's stored assessments, oldest first. Always needs a token.
#[utoipa::path(
    get,
    path = "/api/prediction-history",
    responses(
        (status = 200, description = "Assessment history", body = Vec<AssessmentRecord>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "History store unavailable", body = ErrorResponse)
    ),
    tag = "assessment"
)]
#[get("/api/prediction-history")]
pub async fn prediction_history(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    identity: web::Data<dyn IdentityProvider>,
) -> Result<HttpResponse, ApiError> {
    let caller = resolve_caller(&req, identity.get_ref(), true).await?;
    let history = service.history(&caller).await?;

    Ok(HttpResponse::Ok().json(history))
}

/// Configure assessment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(predict_symptom_based)
        .service(predict_technical)
        .service(prediction_history);
}
