//! Meeting roles.

use serde::{Deserialize, Serialize};

/// The two BBB roles. BBB tells them apart only by the join password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Moderator,
    #[default]
    Attendee,
}

impl Role {
    /// Parse a role name case-insensitively. Anything but "moderator" is an attendee.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("moderator") {
            Role::Moderator
        } else {
            Role::Attendee
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Moderator => "moderator",
            Role::Attendee => "attendee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}
