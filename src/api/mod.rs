pub mod assessment;
pub mod auth;
pub mod error;
pub mod health;
pub mod openapi;
pub mod resources;

use actix_web::web;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(resources::configure)
        .configure(health::configure)
        .configure(openapi::configure)
        .configure(auth::configure)
        .configure(assessment::configure);
}
