//! Adding users to a team, with capacity and teamset-switch handling.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::port_error_mapping::{
    map_access_error, map_course_error, map_membership_error, map_team_error,
    map_user_directory_error,
};
use crate::domain::ports::{
    AccessPolicy, AddMembersRequest, AddMembershipOutcome, CourseRepository, MembershipRepository,
    TeamMembershipCommand, TeamRepository, UserDirectory,
};
use crate::domain::{Error, ErrorCode, Membership, Team, TeamId, User};

/// Membership mutation over the host platform's team store.
pub struct TeamMembershipService<C, T, M, U, A> {
    courses: Arc<C>,
    teams: Arc<T>,
    memberships: Arc<M>,
    users: Arc<U>,
    access: Arc<A>,
}

impl<C, T, M, U, A> TeamMembershipService<C, T, M, U, A> {
    pub fn new(
        courses: Arc<C>,
        teams: Arc<T>,
        memberships: Arc<M>,
        users: Arc<U>,
        access: Arc<A>,
    ) -> Self {
        Self {
            courses,
            teams,
            memberships,
            users,
            access,
        }
    }
}

/// Validate that both inputs are present and non-empty, reporting every
/// missing field at once.
fn required_inputs(
    team_id: Option<String>,
    usernames: Option<Vec<String>>,
) -> Result<(TeamId, Vec<String>), Error> {
    let team_id = team_id.filter(|id| !id.trim().is_empty());
    let usernames = usernames.filter(|names| !names.is_empty());
    match (team_id, usernames) {
        (Some(team_id), Some(usernames)) => Ok((TeamId::new(team_id), usernames)),
        (team_id, usernames) => {
            let mut error = Error::invalid_request("Required fields are missing.");
            if team_id.is_none() {
                error = error.with_field_error("team_id", "The [team_id] field is required.");
            }
            if usernames.is_none() {
                error = error.with_field_error("usernames", "The [usernames] field is required.");
            }
            Err(error)
        }
    }
}

impl<C, T, M, U, A> TeamMembershipService<C, T, M, U, A>
where
    C: CourseRepository,
    T: TeamRepository,
    M: MembershipRepository,
    U: UserDirectory,
    A: AccessPolicy,
{
    async fn authorize(&self, requester: &User, team: &Team) -> Result<(), Error> {
        let can_see = self
            .access
            .has_specific_team_access(requester, team)
            .await
            .map_err(map_access_error)?;
        if !can_see {
            return Err(Error::forbidden(format!(
                "The user={} does not have access to the specified team.",
                requester.username
            )));
        }
        let can_modify = self
            .access
            .can_modify_team(requester, team)
            .await
            .map_err(map_access_error)?;
        if !can_modify {
            return Err(Error::forbidden(format!(
                "The user={} can't join an instructor managed team.",
                requester.username
            )));
        }
        Ok(())
    }

    /// Reject the batch when it would overfill the team.
    ///
    /// Read-then-write without a lock: concurrent requests may both pass.
    async fn check_capacity(&self, team: &Team, usernames: &[String]) -> Result<(), Error> {
        let course = self
            .courses
            .find_course(&team.course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "course {} of team {} could not be loaded",
                    team.course_id, team.team_id
                ))
            })?;
        let Some(max_team_size) = course.teams_configuration.calc_max_team_size(&team.topic_id)
        else {
            return Ok(());
        };
        let occupancy = team.occupancy_excluding(usernames) + usernames.len();
        if occupancy > max_team_size as usize {
            return Err(Error::invalid_request(format!(
                "The team_id={} does not have enough space for the given users.",
                team.team_id
            )));
        }
        Ok(())
    }

    async fn add_one(&self, requester: &User, team: &Team, identifier: &str) -> Result<Membership, Error> {
        let allowed = self
            .access
            .has_team_api_access_for(requester, &team.course_id, identifier)
            .await
            .map_err(map_access_error)?;
        if !allowed {
            return Err(Error::forbidden(format!(
                "The user={} does not have access to the Team API for the given course.",
                requester.username
            )));
        }

        let user = self
            .users
            .find_by_username_or_email(identifier)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| {
                Error::field(
                    ErrorCode::NotFound,
                    "usernames",
                    format!("The username={identifier} does not exist."),
                )
            })?;

        match self.attempt_add(team, &user, identifier).await? {
            Some(membership) => Ok(membership),
            None => {
                self.vacate_teamset(team, &user).await?;
                self.attempt_add(team, &user, identifier)
                    .await?
                    .ok_or_else(|| {
                        Error::internal(format!(
                            "user {} still holds a membership in the teamset of team {} after switching",
                            user.username, team.team_id
                        ))
                    })
            }
        }
    }

    /// One add attempt. `None` signals a teamset conflict.
    async fn attempt_add(
        &self,
        team: &Team,
        user: &User,
        identifier: &str,
    ) -> Result<Option<Membership>, Error> {
        let outcome = self
            .memberships
            .add_membership(team, user)
            .await
            .map_err(map_membership_error)?;
        match outcome {
            AddMembershipOutcome::Added(membership) => Ok(Some(membership)),
            AddMembershipOutcome::AlreadyInTeamset => Ok(None),
            AddMembershipOutcome::NotEnrolled => Err(Error::field(
                ErrorCode::InvalidRequest,
                "usernames",
                format!(
                    "The username={identifier} is not enrolled in the course associated with this team."
                ),
            )),
        }
    }

    /// Delete the membership `user` holds in the teamset of `team`.
    async fn vacate_teamset(&self, team: &Team, user: &User) -> Result<(), Error> {
        let previous = self
            .memberships
            .find_membership(user, &team.course_id, &team.topic_id)
            .await
            .map_err(map_membership_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "teamset conflict reported for {} but no membership was found",
                    user.username
                ))
            })?;
        self.memberships
            .delete_membership(&previous)
            .await
            .map_err(map_membership_error)?;
        info!(
            username = %user.username,
            from_team = %previous.team_id,
            to_team = %team.team_id,
            "moving user between teams in a teamset"
        );
        Ok(())
    }
}

#[async_trait]
impl<C, T, M, U, A> TeamMembershipCommand for TeamMembershipService<C, T, M, U, A>
where
    C: CourseRepository,
    T: TeamRepository,
    M: MembershipRepository,
    U: UserDirectory,
    A: AccessPolicy,
{
    async fn add_members(&self, request: AddMembersRequest) -> Result<Vec<Membership>, Error> {
        let AddMembersRequest {
            requester,
            team_id,
            usernames,
        } = request;
        let (team_id, usernames) = required_inputs(team_id, usernames)?;

        let team = self
            .teams
            .find_team(&team_id)
            .await
            .map_err(map_team_error)?
            .ok_or_else(|| {
                Error::field(
                    ErrorCode::NotFound,
                    "team_id",
                    format!("The supplied team_id={team_id} does not exist."),
                )
            })?;

        self.authorize(&requester, &team).await?;
        self.check_capacity(&team, &usernames).await?;

        let mut memberships = Vec::with_capacity(usernames.len());
        for identifier in &usernames {
            memberships.push(self.add_one(&requester, &team, identifier).await?);
        }
        Ok(memberships)
    }
}

#[cfg(test)]
#[path = "team_membership_service_tests.rs"]
mod tests;
