//! Token extraction from the upgrade request
//!
//! Browsers cannot set headers on a WebSocket upgrade, so the token rides
//! in the query string: a `token` parameter, or an `authorization`
//! parameter carrying a "Bearer "-prefixed value.

use std::collections::HashMap;

/// Primary query parameter
const TOKEN_PARAM: &str = "token";

/// Fallback query parameter; value may carry a bearer prefix
const AUTHORIZATION_PARAM: &str = "authorization";

/// Extract the bearer token from upgrade-request query parameters
///
/// `token` wins over `authorization` when both are present.
pub fn extract_token(params: &HashMap<String, String>) -> Option<String> {
    if let Some(token) = params.get(TOKEN_PARAM) {
        if !token.is_empty() {
            return Some(token.clone());
        }
    }

    params
        .get(AUTHORIZATION_PARAM)
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).to_string())
        .filter(|token| !token.is_empty())
}
