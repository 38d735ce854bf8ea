//! Teams and their memberships.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseKey, TopicId, Username};

/// Identifier of a team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for TeamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's membership of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub username: Username,
    pub team_id: TeamId,
    pub date_joined: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// A team inside one topic of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub description: String,
    pub course_id: CourseKey,
    pub topic_id: TopicId,
    pub organization_protected: bool,
    pub date_created: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub membership: Vec<Membership>,
}

impl Team {
    /// Whether `username` currently belongs to the team.
    pub fn has_member(&self, username: &Username) -> bool {
        self.membership
            .iter()
            .any(|member| &member.username == username)
    }

    /// Number of current members whose username is not in `incoming`.
    ///
    /// Matching is exact: a member listed by email in `incoming` still
    /// counts towards occupancy.
    pub fn occupancy_excluding<S: AsRef<str>>(&self, incoming: &[S]) -> usize {
        self.membership
            .iter()
            .filter(|member| {
                !incoming
                    .iter()
                    .any(|name| name.as_ref() == member.username.as_ref())
            })
            .count()
    }
}
