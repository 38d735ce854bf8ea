//! Driven-port implementations for [`InMemoryPlatform`].

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use super::InMemoryPlatform;
use crate::domain::ports::{
    AccessPolicy, AccessPolicyError, AddMembershipOutcome, Authenticator, AuthenticatorError,
    CourseRepository, CourseRepositoryError, Credential, MembershipRepository,
    MembershipRepositoryError, TeamQuery, TeamRepository, TeamRepositoryError, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{
    Course, CourseKey, Membership, OrganizationProtectionStatus, Team, TeamId, TeamsConfiguration,
    TopicId, User,
};

#[async_trait]
impl CourseRepository for InMemoryPlatform {
    async fn find_course(&self, key: &CourseKey) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self.state.read().await;
        Ok(state.courses.get(key).map(|record| record.course.clone()))
    }

    async fn update_teams_configuration(
        &self,
        course: &Course,
        configuration: TeamsConfiguration,
        editor: &User,
    ) -> Result<TeamsConfiguration, CourseRepositoryError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = configuration
            .topics
            .iter()
            .find(|topic| !seen.insert(topic.id.clone()))
        {
            return Err(CourseRepositoryError::invalid_configuration(format!(
                "duplicate topic id {}",
                duplicate.id
            )));
        }

        let mut state = self.state.write().await;
        let record = state.courses.get_mut(&course.key).ok_or_else(|| {
            CourseRepositoryError::query(format!("course {} no longer exists", course.key))
        })?;
        record.course.teams_configuration = configuration.clone();
        debug!(
            course_id = %course.key,
            editor = %editor.username,
            topics = configuration.topics.len(),
            "teams configuration updated"
        );
        Ok(configuration)
    }
}

#[async_trait]
impl TeamRepository for InMemoryPlatform {
    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>, TeamRepositoryError> {
        let state = self.state.read().await;
        Ok(state.teams.get(team_id).map(|team| state.hydrate(team)))
    }

    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, TeamRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .teams
            .values()
            .filter(|team| query.matches(team))
            .map(|team| state.hydrate(team))
            .collect())
    }

    async fn teams_in_topic(
        &self,
        course_id: &CourseKey,
        topic_id: &TopicId,
    ) -> Result<Vec<Team>, TeamRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .teams
            .values()
            .filter(|team| &team.course_id == course_id && &team.topic_id == topic_id)
            .map(|team| state.hydrate(team))
            .collect())
    }

    async fn delete_team(&self, team: &Team) -> Result<(), TeamRepositoryError> {
        let mut state = self.state.write().await;
        state.teams.remove(&team.team_id);
        debug!(team_id = %team.team_id, "team deleted");
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryPlatform {
    async fn add_membership(
        &self,
        team: &Team,
        user: &User,
    ) -> Result<AddMembershipOutcome, MembershipRepositoryError> {
        let mut state = self.state.write().await;
        if !state.teams.contains_key(&team.team_id) {
            return Err(MembershipRepositoryError::query(format!(
                "team {} no longer exists",
                team.team_id
            )));
        }
        if !state.is_enrolled(&user.username, &team.course_id) {
            return Ok(AddMembershipOutcome::NotEnrolled);
        }
        let in_teamset = state.memberships.iter().any(|membership| {
            membership.username == user.username
                && state.teams.get(&membership.team_id).is_some_and(|other| {
                    other.course_id == team.course_id && other.topic_id == team.topic_id
                })
        });
        if in_teamset {
            return Ok(AddMembershipOutcome::AlreadyInTeamset);
        }

        let now = self.clock.utc();
        let membership = Membership {
            username: user.username.clone(),
            team_id: team.team_id.clone(),
            date_joined: now,
            last_activity_at: now,
        };
        state.memberships.push(membership.clone());
        if let Some(stored) = state.teams.get_mut(&team.team_id) {
            stored.last_activity_at = now;
        }
        debug!(team_id = %team.team_id, username = %user.username, "membership added");
        Ok(AddMembershipOutcome::Added(membership))
    }

    async fn find_membership(
        &self,
        user: &User,
        course_id: &CourseKey,
        topic_id: &TopicId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .filter(|membership| membership.username == user.username)
            .filter(|membership| {
                state.teams.get(&membership.team_id).is_some_and(|team| {
                    &team.course_id == course_id && &team.topic_id == topic_id
                })
            })
            .max_by_key(|membership| membership.date_joined)
            .cloned())
    }

    async fn delete_membership(
        &self,
        membership: &Membership,
    ) -> Result<(), MembershipRepositoryError> {
        let mut state = self.state.write().await;
        state.memberships.retain(|existing| {
            !(existing.team_id == membership.team_id && existing.username == membership.username)
        });
        debug!(
            team_id = %membership.team_id,
            username = %membership.username,
            "membership deleted"
        );
        Ok(())
    }

    async fn delete_team_memberships(&self, team: &Team) -> Result<(), MembershipRepositoryError> {
        let mut state = self.state.write().await;
        state
            .memberships
            .retain(|membership| membership.team_id != team.team_id);
        debug!(team_id = %team.team_id, "team memberships deleted");
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryPlatform {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserDirectoryError> {
        let state = self.state.read().await;
        let by_username = state
            .users
            .values()
            .find(|user| user.username.as_ref() == identifier);
        Ok(by_username
            .or_else(|| {
                state
                    .users
                    .values()
                    .find(|user| user.is_identified_by(identifier))
            })
            .cloned())
    }
}

#[async_trait]
impl AccessPolicy for InMemoryPlatform {
    async fn has_studio_write_access(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        Ok(state.roles(course_id).is_some_and(|roles| {
            roles.staff.contains(&user.username) || roles.studio_writers.contains(&user.username)
        }))
    }

    async fn has_team_api_access(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        Ok(state.is_staff(&user.username, course_id)
            || state.is_enrolled(&user.username, course_id))
    }

    async fn has_team_api_access_for(
        &self,
        user: &User,
        course_id: &CourseKey,
        username: &str,
    ) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        if state.is_staff(&user.username, course_id) {
            return Ok(true);
        }
        Ok(state.is_enrolled(&user.username, course_id) && user.is_identified_by(username))
    }

    async fn has_specific_team_access(
        &self,
        user: &User,
        team: &Team,
    ) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        if state.is_staff(&user.username, &team.course_id) {
            return Ok(true);
        }
        if state.is_private_team(team) {
            return Ok(state.is_member(&user.username, &team.team_id));
        }
        Ok(state.is_enrolled(&user.username, &team.course_id))
    }

    async fn can_modify_team(&self, user: &User, team: &Team) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        Ok(state.is_staff(&user.username, &team.course_id)
            || !state.is_instructor_managed_team(team))
    }

    async fn has_course_staff_privileges(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<bool, AccessPolicyError> {
        let state = self.state.read().await;
        Ok(state.is_staff(&user.username, course_id))
    }

    async fn organization_protection_status(
        &self,
        user: &User,
        course_id: &CourseKey,
    ) -> Result<OrganizationProtectionStatus, AccessPolicyError> {
        let state = self.state.read().await;
        if state.is_staff(&user.username, course_id) {
            return Ok(OrganizationProtectionStatus::Exempt);
        }
        Ok(state
            .roles(course_id)
            .and_then(|roles| roles.organization_protection.get(&user.username).copied())
            .unwrap_or(OrganizationProtectionStatus::Unprotected))
    }
}

#[async_trait]
impl Authenticator for InMemoryPlatform {
    async fn authenticate(&self, credential: &Credential) -> Result<Option<User>, AuthenticatorError> {
        let state = self.state.read().await;
        let username = match credential {
            Credential::Bearer(token) => state.tokens.get(token.as_str()),
            Credential::Session(username) => state
                .users
                .keys()
                .find(|candidate| candidate.as_ref() == username.as_str()),
        };
        Ok(username.and_then(|username| state.users.get(username)).cloned())
    }
}
