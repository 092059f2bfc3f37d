use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

/// Role attached to a user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Producer,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::Admin, Self::Producer, Self::Student];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Producer => "producer",
            Self::Student => "student",
        }
    }

    /// Admins and producers may create courses.
    #[must_use]
    pub fn can_manage_courses(self) -> bool {
        matches!(self, Self::Admin | Self::Producer)
    }

    /// Only admins may change other users' roles.
    #[must_use]
    pub fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Self::Admin),
            "producer" => Ok(Self::Producer),
            "student" => Ok(Self::Student),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// The authenticated user as reported by the session provider.
///
/// Passed explicitly to every service call and view that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: UserId,
    pub role: Role,
}

impl UserSession {
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub fn can_manage_courses(&self) -> bool {
        self.role.can_manage_courses()
    }

    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        self.role.can_manage_users()
    }
}
