//! Domain ports.
//!
//! Driven ports (`*Repository`, [`UserDirectory`], [`AccessPolicy`],
//! [`Authenticator`]) are implemented by outbound adapters standing in for
//! the host platform. Driving ports ([`TopicAdministration`],
//! [`TopicsQuery`], [`TeamMembershipCommand`]) are what inbound adapters
//! call.

mod macros;

mod access_policy;
mod authenticator;
mod course_repository;
mod membership_repository;
mod team_membership_command;
mod team_repository;
mod topic_administration;
mod topics_query;
mod user_directory;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use access_policy::MockAccessPolicy;
pub use access_policy::{AccessPolicy, AccessPolicyError};
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{Authenticator, AuthenticatorError, Credential};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use membership_repository::MockMembershipRepository;
pub use membership_repository::{
    AddMembershipOutcome, MembershipRepository, MembershipRepositoryError,
};
#[cfg(test)]
pub use team_membership_command::MockTeamMembershipCommand;
pub use team_membership_command::{AddMembersRequest, TeamMembershipCommand};
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::{TeamQuery, TeamRepository, TeamRepositoryError};
#[cfg(test)]
pub use topic_administration::MockTopicAdministration;
pub use topic_administration::{
    CreateTopicRequest, DeleteTopicRequest, TopicAdministration, TopicDraft,
};
#[cfg(test)]
pub use topics_query::MockTopicsQuery;
pub use topics_query::{ListTopicsRequest, TopicSummary, TopicsQuery};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
