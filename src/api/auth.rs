//! Registration, login and caller resolution

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::config::AuthConfig;
use crate::model::{CallerIdentity, LoginRequest, RegisterRequest, UserProfile};
use crate::service::IdentityProvider;
use crate::service::identity::IdentityError;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub user: UserProfile,
}

/// Work out who is calling from the `Authorization` header.
///
/// Without a header the caller is anonymous unless `require_auth` is set. A
/// header that is present must always carry a valid token.
pub async fn resolve_caller(
    req: &HttpRequest,
    identity: &dyn IdentityProvider,
    require_auth: bool,
) -> Result<CallerIdentity, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => Ok(CallerIdentity::User(identity.authenticate(token).await?)),
        None if require_auth => Err(IdentityError::MissingToken.into()),
        None => Ok(CallerIdentity::Anonymous),
    }
}

/// Resolve the caller using the configured policy
pub async fn caller(
    req: &HttpRequest,
    identity: &web::Data<dyn IdentityProvider>,
    auth: &web::Data<AuthConfig>,
) -> Result<CallerIdentity, ApiError> {
    resolve_caller(req, identity.get_ref(), auth.require_auth).await
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::api::error::ErrorResponse),
        (status = 409, description = "User already exists", body = crate::api::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[post("/api/register")]
pub async fn register(
    identity: web::Data<dyn IdentityProvider>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    identity.register(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Registration successful".to_string(),
    }))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields", body = crate::api::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::api::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[post("/api/login")]
pub async fn login(
    identity: web::Data<dyn IdentityProvider>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = identity.login(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
        user: session.user,
    }))
}

/// Report the authenticated user for a token
#[utoipa::path(
    get,
    path = "/api/check-auth",
    responses(
        (status = 200, description = "Token is valid", body = AuthStatusResponse),
        (status = 401, description = "Missing, invalid or expired token", body = crate::api::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[get("/api/check-auth")]
pub async fn check_auth(
    req: HttpRequest,
    identity: web::Data<dyn IdentityProvider>,
) -> Result<HttpResponse, ApiError> {
    let email = match resolve_caller(&req, identity.get_ref(), true).await? {
        CallerIdentity::User(email) => email,
        CallerIdentity::Anonymous => return Err(IdentityError::MissingToken.into()),
    };
    let user = identity.profile(&email).await?;

    Ok(HttpResponse::Ok().json(AuthStatusResponse {
        authenticated: true,
        user,
    }))
}

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(check_auth);
}
