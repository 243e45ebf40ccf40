//! User identity and roles
//!
//! The portal mirrors the identity the backend gateway established during the
//! OAuth exchange. Roles arrive as fixed wire strings and are parsed strictly:
//! an unknown role means the response cannot be trusted and is treated as an
//! authentication failure by the callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portal access level, as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Wire representation used by the backend and the session cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a role string outside the three known wire constants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Authenticated portal user.
///
/// `id` duplicates the email: the backend keys sessions by email and the
/// client keeps that convention. `activate` is always true for a user the
/// gateway handed back; deactivated accounts never pass verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
    pub role: Role,
    pub activate: bool,
}

impl User {
    /// Builds the client-side user record from verified gateway fields.
    pub fn from_verified(email: String, name: String, picture: String, role: Role) -> Self {
        Self {
            id: email.clone(),
            email,
            name,
            picture,
            role,
            activate: true,
        }
    }

    /// Initials for the avatar fallback (first letter of up to two name words).
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}
