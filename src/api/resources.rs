//! Service banner, question answering and educational resources

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::auth::caller;
use crate::api::error::{ApiError, ErrorResponse};
use crate::model::config::AuthConfig;
use crate::service::IdentityProvider;
use crate::service::assistant::{EducationalResource, answer_question, educational_resources};

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceBanner {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AssistanceRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssistanceResponse {
    pub response: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = ServiceBanner)
    ),
    tag = "resources"
)]
#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(ServiceBanner {
        message: "Breast Cancer Prediction API".to_string(),
        status: "running".to_string(),
    })
}

/// Answer a free-text question about breast health
#[utoipa::path(
    post,
    path = "/api/ai-assistance",
    request_body = AssistanceRequest,
    responses(
        (status = 200, description = "Answer for the question", body = AssistanceResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "resources"
)]
#[post("/api/ai-assistance")]
pub async fn ai_assistance(
    req: HttpRequest,
    identity: web::Data<dyn IdentityProvider>,
    auth: web::Data<AuthConfig>,
    body: web::Json<AssistanceRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller(&req, &identity, &auth).await?;
    tracing::debug!(user = %caller.user_key(), "Answering assistance question");

    Ok(HttpResponse::Ok().json(AssistanceResponse {
        response: answer_question(&body.question).to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/educational-resources",
    responses(
        (status = 200, description = "Educational resources", body = Vec<EducationalResource>)
    ),
    tag = "resources"
)]
#[get("/api/educational-resources")]
pub async fn list_educational_resources() -> impl Responder {
    HttpResponse::Ok().json(educational_resources())
}

/// Configure banner and resource routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(ai_assistance)
        .service(list_educational_resources);
}
