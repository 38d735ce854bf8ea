//! Driving port for adding users to a team.

use async_trait::async_trait;

use crate::domain::{Error, Membership, User};

/// Batch of users to add to one team.
///
/// Blank `team_id` and an empty `usernames` list count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMembersRequest {
    pub requester: User,
    pub team_id: Option<String>,
    /// Usernames or emails, processed in order.
    pub usernames: Option<Vec<String>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamMembershipCommand: Send + Sync {
    /// Add every listed user to the team, moving users who already belong
    /// to another team in the same teamset.
    ///
    /// Capacity is checked once for the whole batch. The first failing user
    /// aborts the request; memberships created before it are kept.
    async fn add_members(&self, request: AddMembersRequest) -> Result<Vec<Membership>, Error>;
}
