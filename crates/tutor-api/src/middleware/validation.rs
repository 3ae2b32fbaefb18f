//! Request validation
//!
//! Rejects unsupported content types and oversized bodies before they
//! reach business logic. The body-limit layer in the router is the
//! backstop for requests that omit Content-Length.

use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use tutor_common::AppError;

use crate::middleware::short_circuit;
use crate::state::AppState;

/// Request-validation pipeline stage
pub async fn validate_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = check_request(&request, state.config().validation.max_body_bytes) {
        tracing::debug!(error = %err, "Request validation rejected");
        return short_circuit(&err, request.headers());
    }

    next.run(request).await
}

fn check_request(request: &Request, max_body_bytes: usize) -> Result<(), AppError> {
    if !matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH) {
        return Ok(());
    }

    let content_length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok());

    if let Some(length) = content_length {
        if length > max_body_bytes {
            return Err(AppError::PayloadTooLarge {
                max_bytes: max_body_bytes,
            });
        }

        // Bodyless POSTs (e.g. approve/disapprove) carry no content type
        if length == 0 {
            return Ok(());
        }
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_length.is_none() && content_type.is_empty() {
        return Ok(());
    }

    if content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(content_type.to_string()))
    }
}
