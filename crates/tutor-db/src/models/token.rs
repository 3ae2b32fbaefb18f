//! Auth token database model

use sqlx::FromRow;

/// Row joining an opaque token to its user account
///
/// Roles are stored as a comma-separated list on the user row; unknown
/// role strings are ignored when mapping to the Principal.
#[derive(Debug, Clone, FromRow)]
pub struct AuthTokenModel {
    pub user_id: i64,
    pub active: bool,
    pub roles: String,
}
