//! Platform users as seen by the teams plugin.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username must not be empty")]
    Empty,
    #[error("username must not carry surrounding whitespace")]
    Padded,
}

/// Platform username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> Result<Self, UsernameError> {
        let username = username.into();
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        if username.trim() != username {
            return Err(UsernameError::Padded);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A platform account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: Username,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Whether `identifier` names this user by username or email.
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.username.as_ref() == identifier
            || (!self.email.is_empty() && self.email.eq_ignore_ascii_case(identifier))
    }
}

/// How organization protection applies to a requester within a course.
///
/// Protected learners only see protected teams and unprotected learners only
/// see unprotected ones. Exempt requesters (staff) see both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationProtectionStatus {
    Exempt,
    Protected,
    Unprotected,
}

impl OrganizationProtectionStatus {
    /// Value of the `organization_protected` team filter, or `None` when no
    /// filter applies.
    pub const fn team_filter(self) -> Option<bool> {
        match self {
            Self::Exempt => None,
            Self::Protected => Some(true),
            Self::Unprotected => Some(false),
        }
    }
}
