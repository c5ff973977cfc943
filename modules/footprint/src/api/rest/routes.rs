use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::get;

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const INDEX_PATH: &str = "/";
pub const RESULT_PATH: &str = "/result";
pub const STATIC_PATH: &str = "/static/{file}";
pub const STYLESHEET_PATH: &str = "/static/style.css";
pub const HEALTH_PATH: &str = "/health";
pub const HEALTHZ_PATH: &str = "/healthz";

/// Mount the dashboard routes and attach `service` for the handlers.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(INDEX_PATH, get(handlers::index).post(handlers::submit))
        .route(RESULT_PATH, get(handlers::result))
        .route(STATIC_PATH, get(handlers::static_asset))
        .route(HEALTH_PATH, get(handlers::health))
        .route(HEALTHZ_PATH, get(handlers::healthz))
        .layer(Extension(service))
}
