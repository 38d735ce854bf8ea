//! Port for team lookups and deletion.

use async_trait::async_trait;

use crate::domain::{CourseKey, Team, TeamId, TopicId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by team repository adapters.
    pub enum TeamRepositoryError {
        /// The team store could not be reached.
        Connection { message: String } =>
            "team repository connection failed: {message}",
        /// A lookup or mutation failed while executing.
        Query { message: String } =>
            "team repository query failed: {message}",
    }
}

/// Filter applied when listing teams in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamQuery {
    pub course_id: CourseKey,
    /// Restrict to these topics; `None` lists every topic.
    pub topic_ids: Option<Vec<TopicId>>,
    /// Restrict by organization protection; `None` applies no filter.
    pub organization_protected: Option<bool>,
}

impl TeamQuery {
    /// Every team in `course_id`.
    pub fn in_course(course_id: CourseKey) -> Self {
        Self {
            course_id,
            topic_ids: None,
            organization_protected: None,
        }
    }

    #[must_use]
    pub fn in_topics(mut self, topic_ids: Vec<TopicId>) -> Self {
        self.topic_ids = Some(topic_ids);
        self
    }

    #[must_use]
    pub fn organization_protected(mut self, protected: Option<bool>) -> Self {
        self.organization_protected = protected;
        self
    }

    /// Whether `team` satisfies every filter.
    pub fn matches(&self, team: &Team) -> bool {
        team.course_id == self.course_id
            && self
                .topic_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&team.topic_id))
            && self
                .organization_protected
                .is_none_or(|protected| team.organization_protected == protected)
    }
}

/// Team storage. Returned teams carry their current membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>, TeamRepositoryError>;

    /// Teams matching `query`, ordered by team id.
    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, TeamRepositoryError>;

    /// Every team of `course_id` whose topic id is `topic_id`.
    ///
    /// Topic ids are only unique within a course, so the course scopes the
    /// match.
    async fn teams_in_topic(
        &self,
        course_id: &CourseKey,
        topic_id: &TopicId,
    ) -> Result<Vec<Team>, TeamRepositoryError>;

    /// Remove the team record. Memberships are removed separately.
    async fn delete_team(&self, team: &Team) -> Result<(), TeamRepositoryError>;
}
