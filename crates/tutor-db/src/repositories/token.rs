//! Token validator backed by the auth_tokens table
//!
//! Tokens are opaque strings minted by the account system. An unknown
//! token resolves to `None`; an inactive principal is returned as-is so
//! callers can reject it with the right close code or status.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::error::DomainError;
use tutor_core::traits::TokenValidator;
use tutor_core::value_objects::Principal;

use crate::models::AuthTokenModel;

use super::error::map_db_error;

/// PostgreSQL implementation of TokenValidator
#[derive(Clone)]
pub struct PgTokenValidator {
    pool: PgPool,
}

impl PgTokenValidator {
    /// Create a new PgTokenValidator
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenValidator for PgTokenValidator {
    #[instrument(skip(self, token))]
    async fn validate(&self, token: &str) -> Result<Option<Principal>, DomainError> {
        let result = sqlx::query_as::<_, AuthTokenModel>(
            r#"
            SELECT u.id AS user_id, u.active, u.roles
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1
              AND (t.expires_at IS NULL OR t.expires_at > NOW())
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Principal::from))
    }
}
