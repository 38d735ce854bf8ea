//! JSON fixture describing the platform state the in-memory adapter starts
//! with.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    CourseKey, OrganizationProtectionStatus, TeamId, TeamsConfiguration, TopicId, User, Username,
};

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fixture references unknown {kind} {id:?}")]
    UnknownReference { kind: &'static str, id: String },
}

/// Root of a platform fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformFixture {
    #[serde(default)]
    pub users: Vec<User>,
    /// Bearer token to username.
    #[serde(default)]
    pub tokens: BTreeMap<String, Username>,
    #[serde(default)]
    pub courses: Vec<CourseFixture>,
    #[serde(default)]
    pub teams: Vec<TeamFixture>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseFixture {
    pub id: CourseKey,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub teams_configuration: TeamsConfiguration,
    #[serde(default)]
    pub staff: Vec<Username>,
    #[serde(default)]
    pub studio_writers: Vec<Username>,
    #[serde(default)]
    pub enrollments: Vec<Username>,
    /// Protection status per learner; unlisted learners are unprotected.
    #[serde(default)]
    pub organization_protection: BTreeMap<Username, OrganizationProtectionStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamFixture {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub course_id: CourseKey,
    pub topic_id: TopicId,
    #[serde(default)]
    pub organization_protected: bool,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub members: Vec<Username>,
}

impl PlatformFixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(text: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a fixture file.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
