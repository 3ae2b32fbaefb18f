//! Room and Participant entities
//!
//! A Room is an addressable conversation scope. Forum rooms are provisioned
//! from enrollment events and carry the natural key of the relationship
//! that created them; Direct and General rooms are created explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Role, Snowflake};

/// Kind of a room; immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Direct,
    SubjectForum,
    TutorForum,
    General,
}

impl RoomKind {
    /// Stored string form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::SubjectForum => "subject_forum",
            Self::TutorForum => "tutor_forum",
            Self::General => "general",
        }
    }

    /// Parse a kind from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(Self::Direct),
            "subject_forum" => Some(Self::SubjectForum),
            "tutor_forum" => Some(Self::TutorForum),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// Whether a principal with the given role may join without a
    /// pre-existing Participant row. Only General rooms are open; forum and
    /// direct rooms require membership.
    pub fn allows_open_join(self, _role: Role) -> bool {
        matches!(self, Self::General)
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room entity
///
/// Forum rooms carry their provisioning natural key: `student_id` plus
/// `subject_id` (subject forums) or `tutor_id` (tutor forums).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Snowflake,
    pub kind: RoomKind,
    pub student_id: Option<Snowflake>,
    pub subject_id: Option<Snowflake>,
    pub tutor_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room with no natural key (Direct / General)
    pub fn new(id: Snowflake, kind: RoomKind) -> Self {
        Self {
            id,
            kind,
            student_id: None,
            subject_id: None,
            tutor_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a subject forum room keyed by (student, subject)
    pub fn subject_forum(id: Snowflake, student_id: Snowflake, subject_id: Snowflake) -> Self {
        Self {
            id,
            kind: RoomKind::SubjectForum,
            student_id: Some(student_id),
            subject_id: Some(subject_id),
            tutor_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a tutor forum room keyed by (student, tutor)
    pub fn tutor_forum(id: Snowflake, student_id: Snowflake, tutor_id: Snowflake) -> Self {
        Self {
            id,
            kind: RoomKind::TutorForum,
            student_id: Some(student_id),
            subject_id: None,
            tutor_id: Some(tutor_id),
            created_at: Utc::now(),
        }
    }
}

/// Participant - membership of a user in a room
///
/// `last_read_at` only ever advances; `None` means the participant has
/// never read the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub last_read_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant that has never read the room
    pub fn new(room_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            room_id,
            user_id,
            last_read_at: None,
            joined_at: Utc::now(),
        }
    }

    /// Advance the read marker, clamping to the current value
    ///
    /// Returns the effective marker after the update. Stale timestamps are
    /// silently ignored so read progress can never regress.
    pub fn advance_last_read(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        let effective = match self.last_read_at {
            Some(current) if current >= at => current,
            _ => at,
        };
        self.last_read_at = Some(effective);
        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in [
            RoomKind::Direct,
            RoomKind::SubjectForum,
            RoomKind::TutorForum,
            RoomKind::General,
        ] {
            assert_eq!(RoomKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RoomKind::parse("announcement"), None);
    }

    #[test]
    fn test_open_join_is_general_only() {
        assert!(RoomKind::General.allows_open_join(Role::Student));
        assert!(!RoomKind::Direct.allows_open_join(Role::Staff));
        assert!(!RoomKind::SubjectForum.allows_open_join(Role::Teacher));
        assert!(!RoomKind::TutorForum.allows_open_join(Role::Tutor));
    }

    #[test]
    fn test_advance_last_read_is_monotonic() {
        let mut p = Participant::new(Snowflake::new(1), Snowflake::new(2));
        assert!(p.last_read_at.is_none());

        let t1 = Utc::now();
        assert_eq!(p.advance_last_read(t1), t1);

        // Stale timestamp clamps to the current marker
        let stale = t1 - Duration::seconds(30);
        assert_eq!(p.advance_last_read(stale), t1);
        assert_eq!(p.last_read_at, Some(t1));

        let t2 = t1 + Duration::seconds(5);
        assert_eq!(p.advance_last_read(t2), t2);
    }
}
