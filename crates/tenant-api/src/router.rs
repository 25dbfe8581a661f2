//! Route table and middleware stack

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{health, tenants};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Status of a request cut off by the request deadline. No handler answers 504 itself.
const REQUEST_TIMEOUT_STATUS: StatusCode = StatusCode::GATEWAY_TIMEOUT;

/// Gives the bare timeout response the same envelope as every other error.
async fn envelope_timeout(response: Response) -> Response {
    if response.status() != REQUEST_TIMEOUT_STATUS {
        return response;
    }
    warn!("Request exceeded its deadline");
    (
        REQUEST_TIMEOUT_STATUS,
        Json(ApiResponse::failure("REQUEST_TIMEOUT", "Request did not complete before its deadline")),
    )
        .into_response()
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let tenant_routes = Router::new()
        .route("/api/v1/tenants", post(tenants::create_tenant))
        .route("/api/v1/tenants/by-name/", get(tenants::get_tenant_by_empty_name))
        .route("/api/v1/tenants/by-name/{name}", get(tenants::get_tenant_by_name))
        .route("/api/v1/tenants/by-name/{name}/roles", get(tenants::get_tenant_roles));

    Router::new()
        .merge(health_routes)
        .merge(tenant_routes)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(REQUEST_TIMEOUT_STATUS, request_timeout))
        .layer(middleware::map_response(envelope_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
