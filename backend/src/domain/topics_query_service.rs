//! Learner-side topic listing with team rollups.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PaginationError};

use crate::domain::course_lookup::resolve_course;
use crate::domain::port_error_mapping::{map_access_error, map_team_error};
use crate::domain::ports::{
    AccessPolicy, CourseRepository, ListTopicsRequest, TeamQuery, TeamRepository, TopicSummary,
    TopicsQuery,
};
use crate::domain::topic_rollup::{TeamRollupContext, summarise_topic};
use crate::domain::{Course, Error, TeamId, Topic, TopicId, User};

/// Message for a page selector outside the available pages.
pub const INVALID_PAGE: &str = "Invalid page.";

pub struct TopicsQueryService<C, T, A> {
    courses: Arc<C>,
    teams: Arc<T>,
    access: Arc<A>,
}

impl<C, T, A> TopicsQueryService<C, T, A> {
    pub fn new(courses: Arc<C>, teams: Arc<T>, access: Arc<A>) -> Self {
        Self {
            courses,
            teams,
            access,
        }
    }
}

/// What a non-staff requester may not see in private-managed topics.
#[derive(Debug, Default)]
struct PrivateVisibility {
    hidden_topics: HashSet<TopicId>,
    excluded_team_ids: HashSet<TeamId>,
}

fn map_pagination_error(_: PaginationError) -> Error {
    Error::not_found(INVALID_PAGE)
}

impl<C, T, A> TopicsQueryService<C, T, A>
where
    C: CourseRepository,
    T: TeamRepository,
    A: AccessPolicy,
{
    /// Private teamsets the requester has not joined are hidden, and teams
    /// in private teamsets they are not a member of are excluded.
    async fn private_visibility(
        &self,
        requester: &User,
        course: &Course,
    ) -> Result<PrivateVisibility, Error> {
        let private_topics: Vec<TopicId> = course
            .teams_configuration
            .topics
            .iter()
            .filter(|topic| topic.teamset_type.is_private_managed())
            .map(|topic| topic.id.clone())
            .collect();
        if private_topics.is_empty() {
            return Ok(PrivateVisibility::default());
        }

        let query = TeamQuery::in_course(course.key.clone()).in_topics(private_topics.clone());
        let private_teams = self
            .teams
            .list_teams(&query)
            .await
            .map_err(map_team_error)?;

        let (joined, others): (Vec<_>, Vec<_>) = private_teams
            .into_iter()
            .partition(|team| team.has_member(&requester.username));
        let joined_topics: HashSet<TopicId> =
            joined.into_iter().map(|team| team.topic_id).collect();

        Ok(PrivateVisibility {
            hidden_topics: private_topics
                .into_iter()
                .filter(|topic_id| !joined_topics.contains(topic_id))
                .collect(),
            excluded_team_ids: others.into_iter().map(|team| team.team_id).collect(),
        })
    }
}

#[async_trait]
impl<C, T, A> TopicsQuery for TopicsQueryService<C, T, A>
where
    C: CourseRepository,
    T: TeamRepository,
    A: AccessPolicy,
{
    async fn list_topics(&self, request: ListTopicsRequest) -> Result<Page<TopicSummary>, Error> {
        let ListTopicsRequest {
            requester,
            course_id,
            page,
        } = request;
        let course = resolve_course(self.courses.as_ref(), &course_id).await?;

        let allowed = self
            .access
            .has_team_api_access(&requester, &course.key)
            .await
            .map_err(map_access_error)?;
        if !allowed {
            return Err(Error::forbidden(format!(
                "The user={} does not have access to the Team API for the given course.",
                requester.username
            )));
        }

        let protection = self
            .access
            .organization_protection_status(&requester, &course.key)
            .await
            .map_err(map_access_error)?;
        let is_staff = self
            .access
            .has_course_staff_privileges(&requester, &course.key)
            .await
            .map_err(map_access_error)?;

        let visibility = if is_staff {
            PrivateVisibility::default()
        } else {
            self.private_visibility(&requester, &course).await?
        };

        let topics: Vec<Topic> = course
            .teams_configuration
            .alphabetical_topics()
            .into_iter()
            .filter(|topic| !visibility.hidden_topics.contains(&topic.id))
            .collect();
        let page = page.slice(topics).map_err(map_pagination_error)?;
        if page.items().is_empty() {
            return Ok(page.map(|topic| summarise_topic(topic, &TeamRollupContext::default())));
        }

        let query = TeamQuery::in_course(course.key.clone())
            .in_topics(page.items().iter().map(|topic| topic.id.clone()).collect())
            .organization_protected(protection.team_filter());
        let teams = self
            .teams
            .list_teams(&query)
            .await
            .map_err(map_team_error)?;
        let context = TeamRollupContext::new(teams, visibility.excluded_team_ids);
        Ok(page.map(|topic| summarise_topic(topic, &context)))
    }
}

#[cfg(test)]
#[path = "topics_query_service_tests.rs"]
mod tests;
