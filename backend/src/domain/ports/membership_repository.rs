//! Port for team membership records.

use async_trait::async_trait;

use crate::domain::{CourseKey, Membership, Team, TopicId, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership repository adapters.
    pub enum MembershipRepositoryError {
        /// The membership store could not be reached.
        Connection { message: String } =>
            "membership repository connection failed: {message}",
        /// A lookup or mutation failed while executing.
        Query { message: String } =>
            "membership repository query failed: {message}",
    }
}

/// Result of attempting to add a user to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddMembershipOutcome {
    /// The membership was created.
    Added(Membership),
    /// The user already belongs to a team in the same course and topic.
    AlreadyInTeamset,
    /// The user is not enrolled in the team's course.
    NotEnrolled,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Add `user` to `team`, enforcing one team per user per teamset and
    /// course enrollment.
    async fn add_membership(
        &self,
        team: &Team,
        user: &User,
    ) -> Result<AddMembershipOutcome, MembershipRepositoryError>;

    /// The membership `user` holds in the given course and topic, if any.
    async fn find_membership(
        &self,
        user: &User,
        course_id: &CourseKey,
        topic_id: &TopicId,
    ) -> Result<Option<Membership>, MembershipRepositoryError>;

    async fn delete_membership(&self, membership: &Membership) -> Result<(), MembershipRepositoryError>;

    /// Remove every membership of `team`.
    async fn delete_team_memberships(&self, team: &Team) -> Result<(), MembershipRepositoryError>;
}
