//! Gateway protection pipeline
//!
//! Stages in request order: request identification, logging, response
//! transformation (security headers and CORS), version resolution, rate
//! limiting, and request validation. The circuit breaker stage lives in
//! [`crate::state::AppState::protect_store`] around the store calls.
//! Response transformation and logging wrap the short-circuiting stages,
//! so they run for every request no matter which stage rejected it.

mod rate_limit;
mod validation;
mod version;

pub use rate_limit::{enforce_rate_limit, RateLimiter};
pub use validation::validate_request;
pub use version::resolve_version;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode},
    middleware,
    Json,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tutor_common::{AppError, CorsConfig, ErrorResponse};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header name for the API key used as the rate-limit key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header name for explicit version selection
pub const API_VERSION_HEADER: &str = "x-api-version";

/// Apply the outer pipeline stages to the fully assembled router
///
/// Outermost to innermost: request ID assignment/propagation, logging,
/// CORS, and security headers. These wrap everything, including the
/// rejections produced by the inner stages.
pub fn apply_outer_pipeline(router: axum::Router, cors: &CorsConfig, is_production: bool) -> axum::Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(create_cors_layer(cors, is_production))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                        version = tracing::field::Empty,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
}

/// Apply the short-circuiting stages to the API router
///
/// Request order: version resolution, rate limiting, request validation.
/// Health routes are mounted outside this stack.
pub fn apply_protection(router: axum::Router<AppState>, state: &AppState) -> axum::Router<AppState> {
    router
        .layer(middleware::from_fn_with_state(state.clone(), validate_request))
        .layer(middleware::from_fn_with_state(state.clone(), enforce_rate_limit))
        .layer(middleware::from_fn(resolve_version))
}

/// Build a short-circuit rejection carrying the assigned request id
pub(crate) fn short_circuit(err: &AppError, headers: &HeaderMap) -> Response<Body> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err, request_id);

    let mut response = axum::response::IntoResponse::into_response((status, Json(body)));

    if let AppError::RateLimited { retry_after_secs } = err {
        if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }

    response
}

/// Create the CORS layer from configuration
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::HeaderName::from_static(API_KEY_HEADER),
            header::HeaderName::from_static(API_VERSION_HEADER),
        ])
        .expose_headers([
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::RETRY_AFTER,
        ]);

    if is_production || !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                origin.parse::<HeaderValue>().ok().or_else(|| {
                    tracing::warn!("Invalid CORS origin: {}", origin);
                    None
                })
            })
            .collect();

        if origins.is_empty() {
            tracing::warn!(
                "CORS: No allowed origins configured in production mode. \
                 Requests from browsers will be blocked."
            );
        }
        base_layer.allow_origin(AllowOrigin::list(origins))
    } else {
        base_layer.allow_origin(Any)
    }
}
