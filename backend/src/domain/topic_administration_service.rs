//! Authoring-side topic management.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::course_lookup::resolve_course;
use crate::domain::port_error_mapping::{
    map_access_error, map_course_error, map_membership_error, map_team_error,
};
use crate::domain::ports::{
    AccessPolicy, CourseRepository, CreateTopicRequest, DeleteTopicRequest, MembershipRepository,
    TeamRepository, TopicAdministration, TopicDraft,
};
use crate::domain::{Course, CourseKey, Error, ErrorCode, TeamsetType, Topic, TopicId, User};

/// Message returned when the requester lacks studio write access.
pub(crate) const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// Topic administration over the host platform's course settings.
pub struct TopicAdministrationService<C, T, M, A> {
    courses: Arc<C>,
    teams: Arc<T>,
    memberships: Arc<M>,
    access: Arc<A>,
}

impl<C, T, M, A> TopicAdministrationService<C, T, M, A> {
    pub fn new(courses: Arc<C>, teams: Arc<T>, memberships: Arc<M>, access: Arc<A>) -> Self {
        Self {
            courses,
            teams,
            memberships,
            access,
        }
    }
}

/// A draft that passed input validation.
struct ValidTopic {
    name: String,
    description: String,
    teamset_type: TeamsetType,
    max_team_size: Option<u32>,
}

fn validate_draft(draft: TopicDraft) -> Result<ValidTopic, Error> {
    let teamset_type = draft
        .teamset_type
        .as_deref()
        .and_then(|raw| raw.parse::<TeamsetType>().ok())
        .ok_or_else(|| {
            Error::field(
                ErrorCode::InvalidRequest,
                "type",
                format!(
                    "The [type] field must be one of [{}].",
                    TeamsetType::choices()
                ),
            )
        })?;

    let name = draft
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            Error::field(ErrorCode::InvalidRequest, "name", "The [name] field is required.")
        })?;

    let max_team_size = match draft.max_team_size {
        None => None,
        Some(size) => Some(
            u32::try_from(size)
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    Error::field(
                        ErrorCode::InvalidRequest,
                        "max_team_size",
                        "The [max_team_size] field must be a positive integer.",
                    )
                })?,
        ),
    };

    Ok(ValidTopic {
        name,
        description: draft.description.unwrap_or_default(),
        teamset_type,
        max_team_size,
    })
}

impl<C, T, M, A> TopicAdministrationService<C, T, M, A>
where
    C: CourseRepository,
    T: TeamRepository,
    M: MembershipRepository,
    A: AccessPolicy,
{
    async fn writable_course(&self, requester: &User, course_id: &str) -> Result<Course, Error> {
        let course = resolve_course(self.courses.as_ref(), course_id).await?;
        let allowed = self
            .access
            .has_studio_write_access(requester, &course.key)
            .await
            .map_err(map_access_error)?;
        if !allowed {
            return Err(Error::forbidden(PERMISSION_DENIED));
        }
        Ok(course)
    }

    /// Delete every team of the course under `topic_id`, memberships first.
    ///
    /// Every team is attempted; the first failure is returned once the loop
    /// completes. A team whose memberships could not be removed is kept.
    async fn delete_teams_under(
        &self,
        course_id: &CourseKey,
        topic_id: &TopicId,
    ) -> Result<usize, Error> {
        let teams = self
            .teams
            .teams_in_topic(course_id, topic_id)
            .await
            .map_err(map_team_error)?;
        let mut removed = 0;
        let mut first_error = None;
        for team in &teams {
            let outcome = match self.memberships.delete_team_memberships(team).await {
                Ok(()) => self.teams.delete_team(team).await.map_err(map_team_error),
                Err(err) => Err(map_membership_error(err)),
            };
            match outcome {
                Ok(()) => removed += 1,
                Err(err) => {
                    warn!(team_id = %team.team_id, error = %err, "team deletion failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(removed),
        }
    }
}

#[async_trait]
impl<C, T, M, A> TopicAdministration for TopicAdministrationService<C, T, M, A>
where
    C: CourseRepository,
    T: TeamRepository,
    M: MembershipRepository,
    A: AccessPolicy,
{
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Vec<Topic>, Error> {
        let CreateTopicRequest {
            requester,
            course_id,
            draft,
        } = request;
        let valid = validate_draft(draft)?;
        let course = self.writable_course(&requester, &course_id).await?;

        let configuration = &course.teams_configuration;
        if configuration.has_topic_named(&valid.name) {
            return Err(Error::field(
                ErrorCode::InvalidRequest,
                "name",
                format!(
                    "The topic with name={} already exists.",
                    valid.name.to_lowercase()
                ),
            ));
        }

        let topic = Topic {
            id: TopicId::random(),
            name: valid.name,
            description: valid.description,
            teamset_type: valid.teamset_type,
            max_team_size: valid.max_team_size,
        };
        let stored = self
            .courses
            .update_teams_configuration(&course, configuration.with_topic(topic), &requester)
            .await
            .map_err(map_course_error)?;
        Ok(stored.topics)
    }

    async fn delete_topic(&self, request: DeleteTopicRequest) -> Result<Vec<Topic>, Error> {
        let DeleteTopicRequest {
            requester,
            course_id,
            topic_id,
        } = request;
        let course = self.writable_course(&requester, &course_id).await?;

        let configuration = &course.teams_configuration;
        if configuration.topic(&topic_id).is_none() {
            return Err(Error::field(
                ErrorCode::NotFound,
                "topic_id",
                format!("The supplied topic_id={topic_id} is not found."),
            ));
        }

        let stored = self
            .courses
            .update_teams_configuration(
                &course,
                configuration.without_topic(&topic_id),
                &requester,
            )
            .await
            .map_err(map_course_error)?;

        let removed = self.delete_teams_under(&course.key, &topic_id).await?;
        info!(
            course_id = %course.key,
            topic_id = %topic_id,
            teams_removed = removed,
            "topic deleted"
        );
        Ok(stored.topics)
    }
}

#[cfg(test)]
#[path = "topic_administration_service_tests.rs"]
mod tests;
