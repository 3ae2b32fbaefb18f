//! WebSocket close codes
//!
//! Rejected connections receive one of these codes in the close frame and
//! nothing else; no normal frame is ever sent before the rejection.

use serde::{Deserialize, Serialize};

/// Gateway WebSocket close codes
///
/// These codes are part of the wire contract: clients distinguish a bad
/// token from a room they may not join by the code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum CloseCode {
    /// No token, unknown token, or inactive principal
    AuthenticationFailed = 4001,
    /// Valid token, but the requested room is not joinable
    Forbidden = 4003,
}

impl CloseCode {
    /// Create a `CloseCode` from a raw u16 value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            4001 => Some(Self::AuthenticationFailed),
            4003 => Some(Self::Forbidden),
            _ => None,
        }
    }

    /// Get the raw u16 value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Check if the client should attempt to reconnect after this close code
    ///
    /// Neither rejection is transient: a new token or a membership change
    /// is needed first.
    #[must_use]
    pub const fn should_reconnect(self) -> bool {
        match self {
            Self::AuthenticationFailed | Self::Forbidden => false,
        }
    }

    /// Get the description for this close code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "Authentication failed",
            Self::Forbidden => "Forbidden",
        }
    }

    /// Get the name of this close code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "AuthenticationFailed",
            Self::Forbidden => "Forbidden",
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.as_u16(), self.description())
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}
