//! Port answering permission questions about a requester.
//!
//! Roles, enrollment and team visibility are owned by the host platform; the
//! plugin only asks.

use async_trait::async_trait;

use crate::domain::{CourseKey, OrganizationProtectionStatus, Team, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by access policy adapters.
    pub enum AccessPolicyError {
        Connection { message: String } =>
            "access policy connection failed: {message}",
        Query { message: String } =>
            "access policy query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// Whether `user` may edit the course in the authoring surface.
    async fn has_studio_write_access(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError>;

    /// Whether `user` may use the team API for `course_id`.
    async fn has_team_api_access(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError>;

    /// Whether `user` may use the team API for `course_id` on behalf of
    /// `username`. Requesters may always act for themselves when they have
    /// team API access.
    async fn has_team_api_access_for(
        &self,
        user: &User,
        course_id: &CourseKey,
        username: &str,
    ) -> Result<bool, AccessPolicyError>;

    /// Whether `user` may see `team`. Private teamset teams are only
    /// visible to their members and staff.
    async fn has_specific_team_access(&self, user: &User, team: &Team)
    -> Result<bool, AccessPolicyError>;

    /// Whether `user` may change membership of `team`.
    async fn can_modify_team(&self, user: &User, team: &Team) -> Result<bool, AccessPolicyError>;

    /// Whether `user` holds course staff privileges.
    async fn has_course_staff_privileges(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError>;

    async fn organization_protection_status(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<OrganizationProtectionStatus, AccessPolicyError>;
}
