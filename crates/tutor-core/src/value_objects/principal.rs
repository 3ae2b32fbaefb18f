//! Principal - authenticated identity resolved from a bearer token
//!
//! Principals are resolved per request or per connection by the token
//! validator and are never persisted by this layer.

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// Platform role attached to a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Tutor,
    Moderator,
    Staff,
}

impl Role {
    /// Parse a role from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "tutor" => Some(Self::Tutor),
            "moderator" => Some(Self::Moderator),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }

    /// Stored string form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Tutor => "tutor",
            Self::Moderator => "moderator",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity resolved from an opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Snowflake,
    pub active: bool,
    pub roles: Vec<Role>,
}

impl Principal {
    /// Create a new Principal
    pub fn new(id: Snowflake, active: bool, roles: Vec<Role>) -> Self {
        Self { id, active, roles }
    }

    /// Check whether the principal holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check whether the principal may moderate comment threads
    pub fn is_moderator(&self) -> bool {
        self.has_role(Role::Moderator) || self.has_role(Role::Staff)
    }
}
