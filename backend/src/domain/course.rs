//! Course identity and the teams configuration attached to a course.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Topic, TopicId};

/// Prefix of modern course keys.
const COURSE_KEY_PREFIX: &str = "course-v1:";

/// Validation errors returned by [`CourseKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseKeyError {
    /// The key has neither the modern nor the legacy shape.
    #[error("course key must look like course-v1:ORG+COURSE+RUN or ORG/COURSE/RUN")]
    Malformed,
    /// A component contains characters outside the allowed set.
    #[error("course key component {component:?} contains invalid characters")]
    InvalidComponent { component: String },
}

/// Parsed course identifier such as `course-v1:OrgX+CS101+2024`.
///
/// Legacy slash-separated keys (`OrgX/CS101/2024`) are also accepted. The
/// original spelling is kept so keys render exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey {
    raw: String,
    org: String,
    course: String,
    run: String,
}

impl CourseKey {
    /// Parse a serialized course key.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CourseKeyError> {
        let raw = raw.into();
        let parts: Vec<&str> = match raw.strip_prefix(COURSE_KEY_PREFIX) {
            Some(rest) => rest.split('+').collect(),
            None => raw.split('/').collect(),
        };
        let [org, course, run] = parts.as_slice() else {
            return Err(CourseKeyError::Malformed);
        };
        for component in [org, course, run] {
            validate_component(component)?;
        }
        Ok(Self {
            org: (*org).to_owned(),
            course: (*course).to_owned(),
            run: (*run).to_owned(),
            raw,
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }
}

fn validate_component(component: &str) -> Result<(), CourseKeyError> {
    if component.is_empty() {
        return Err(CourseKeyError::Malformed);
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '~' | '.' | ':');
    if component.chars().all(allowed) {
        Ok(())
    } else {
        Err(CourseKeyError::InvalidComponent {
            component: component.to_owned(),
        })
    }
}

impl AsRef<str> for CourseKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<CourseKey> for String {
    fn from(value: CourseKey) -> Self {
        value.raw
    }
}

impl TryFrom<String> for CourseKey {
    type Error = CourseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Teams settings stored on a course.
///
/// Topics are kept in the order an author saved them; listing sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsConfiguration {
    /// Course-wide default team size; `None` means unbounded.
    #[serde(default)]
    pub max_team_size: Option<u32>,
    /// Configured teamsets.
    #[serde(default, alias = "team_sets")]
    pub topics: Vec<Topic>,
}

impl TeamsConfiguration {
    /// Topic with the given id.
    pub fn topic(&self, topic_id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| &topic.id == topic_id)
    }

    /// Whether a topic with this name exists, ignoring case.
    pub fn has_topic_named(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.topics
            .iter()
            .any(|topic| topic.name.to_lowercase() == needle)
    }

    /// Copy with `topic` appended.
    #[must_use]
    pub fn with_topic(&self, topic: Topic) -> Self {
        let mut next = self.clone();
        next.topics.push(topic);
        next
    }

    /// Copy with every topic matching `topic_id` removed.
    #[must_use]
    pub fn without_topic(&self, topic_id: &TopicId) -> Self {
        Self {
            max_team_size: self.max_team_size,
            topics: self
                .topics
                .iter()
                .filter(|topic| &topic.id != topic_id)
                .cloned()
                .collect(),
        }
    }

    /// Topics sorted by case-insensitive name; ties keep configured order.
    pub fn alphabetical_topics(&self) -> Vec<Topic> {
        let mut topics = self.topics.clone();
        topics.sort_by_cached_key(|topic| topic.name.to_lowercase());
        topics
    }

    /// Capacity limit for teams in `topic_id`; `None` means unbounded.
    ///
    /// Unknown topics and instructor-managed topics are unbounded. Other
    /// topics use their own limit and fall back to the course default.
    pub fn calc_max_team_size(&self, topic_id: &TopicId) -> Option<u32> {
        let topic = self.topic(topic_id)?;
        if topic.teamset_type.is_instructor_managed() {
            return None;
        }
        topic.max_team_size.or(self.max_team_size)
    }
}

/// Course as seen by the teams plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub key: CourseKey,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub teams_configuration: TeamsConfiguration,
}
