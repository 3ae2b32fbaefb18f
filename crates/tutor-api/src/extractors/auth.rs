//! Authentication extractor
//!
//! Resolves the opaque bearer token from the Authorization header to a
//! principal through the token validator.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tutor_common::AppError;
use tutor_core::value_objects::Principal;
use tutor_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated principal resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
}

impl AuthUser {
    /// Get the authenticated user's ID
    pub fn user_id(&self) -> Snowflake {
        self.principal.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let principal = app_state
            .service_context()
            .token_validator()
            .validate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Token validation failed");
                ApiError::App(AppError::AuthenticationFailed)
            })?
            .ok_or_else(|| {
                tracing::debug!("Unknown bearer token");
                ApiError::App(AppError::AuthenticationFailed)
            })?;

        if !principal.active {
            tracing::debug!(user_id = %principal.id, "Inactive principal rejected");
            return Err(ApiError::App(AppError::InactivePrincipal));
        }

        Ok(AuthUser { principal })
    }
}
