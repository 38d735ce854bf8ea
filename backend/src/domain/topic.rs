//! Topics (teamsets) configured on a course.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of a topic within its course.
///
/// Topics created through the API receive a random UUID; imported courses
/// may carry arbitrary string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier for a newly created topic.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for TopicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned when a teamset type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown teamset type {0:?}")]
pub struct UnknownTeamsetType(pub String);

/// Who may form and join teams in a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamsetType {
    /// Learners create and join teams freely.
    #[default]
    Open,
    /// Staff manage teams; teams are visible to everyone.
    PublicManaged,
    /// Staff manage teams; teams are visible to members only.
    PrivateManaged,
    /// Staff create teams; learners join freely.
    OpenManaged,
}

impl TeamsetType {
    /// Every accepted value in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Open,
        Self::PublicManaged,
        Self::PrivateManaged,
        Self::OpenManaged,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::PublicManaged => "public_managed",
            Self::PrivateManaged => "private_managed",
            Self::OpenManaged => "open_managed",
        }
    }

    /// Team membership in these topics is controlled by staff, so no
    /// capacity limit applies.
    pub const fn is_instructor_managed(self) -> bool {
        matches!(self, Self::PublicManaged | Self::PrivateManaged)
    }

    pub const fn is_private_managed(self) -> bool {
        matches!(self, Self::PrivateManaged)
    }

    /// Accepted values joined for error messages.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TeamsetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamsetType {
    type Err = UnknownTeamsetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTeamsetType(s.to_owned()))
    }
}

/// A named grouping of teams within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub teamset_type: TeamsetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_team_size: Option<u32>,
}
