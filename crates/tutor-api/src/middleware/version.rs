//! API version resolution
//!
//! Resolves the requested version from the `x-api-version` header or the
//! path prefix, and records it on the request span. Only v1 exists.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tutor_common::AppError;

use crate::middleware::{short_circuit, API_VERSION_HEADER};

/// The only supported API version
const SUPPORTED_VERSION: &str = "v1";

/// Version-resolution pipeline stage
pub async fn resolve_version(request: Request, next: Next) -> Response {
    let resolved = match requested_version(&request) {
        Ok(version) => version,
        Err(unsupported) => {
            tracing::debug!(version = %unsupported, "Unsupported API version");
            let err = AppError::UnsupportedVersion(unsupported);
            return short_circuit(&err, request.headers());
        }
    };

    tracing::Span::current().record("version", resolved);

    next.run(request).await
}

/// Resolve the version the caller asked for
///
/// A header wins over the path prefix so clients behind rewriting proxies
/// can still pin a version explicitly.
fn requested_version(request: &Request) -> Result<&'static str, String> {
    if let Some(header) = request
        .headers()
        .get(API_VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return match header.trim_start_matches('v') {
            "1" => Ok(SUPPORTED_VERSION),
            _ => Err(header.to_string()),
        };
    }

    let path = request.uri().path();
    match path.strip_prefix("/api/") {
        Some(rest) => {
            let segment = rest.split('/').next().unwrap_or_default();
            if segment == SUPPORTED_VERSION {
                Ok(SUPPORTED_VERSION)
            } else {
                Err(segment.to_string())
            }
        }
        None => Ok(SUPPORTED_VERSION),
    }
}
