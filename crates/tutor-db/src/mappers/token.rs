//! Auth token model -> Principal mapper

use tutor_core::value_objects::{Principal, Role, Snowflake};

use crate::models::AuthTokenModel;

/// Convert AuthTokenModel to a Principal, dropping unknown role strings
impl From<AuthTokenModel> for Principal {
    fn from(model: AuthTokenModel) -> Self {
        let roles = model
            .roles
            .split(',')
            .filter_map(|s| Role::parse(s.trim()))
            .collect();
        Principal::new(Snowflake::new(model.user_id), model.active, roles)
    }
}
