//! Learner-side topic listing.
//!
//! ```text
//! GET {prefix}/{course_id}/api/topics/?page=2&page_size=12
//! ```

use actix_web::{HttpRequest, get, web};
use chrono::{DateTime, Utc};
use pagination::{PageRequest, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ListTopicsRequest, TopicSummary};
use crate::domain::topics_query_service::INVALID_PAGE;
use crate::domain::{Error, Membership, Team, TeamsetType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Requester;
use crate::inbound::http::links::PlatformLinks;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::topics_admin::CoursePath;

/// Raw paging parameters; parsed leniently by the pagination crate.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopicsQueryParams {
    /// 1-based page number or `last`.
    pub page: Option<String>,
    /// Requested page size; invalid values fall back to the default.
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberUserResponse {
    pub username: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberResponse {
    pub user: MemberUserResponse,
    pub date_joined: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// A team nested under its topic in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamSummaryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub course_id: String,
    pub topic_id: String,
    pub date_created: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub organization_protected: bool,
    pub membership: Vec<TeamMemberResponse>,
}

/// A topic with its team rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicListingResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub teamset_type: TeamsetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_team_size: Option<u32>,
    pub team_count: usize,
    pub teams: Vec<TeamSummaryResponse>,
}

/// Paginated topic listing envelope, documented for OpenAPI.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TopicPageSchema {
    count: usize,
    num_pages: usize,
    current_page: usize,
    start: usize,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<TopicListingResponse>,
}

fn member_response(links: &PlatformLinks, membership: Membership) -> TeamMemberResponse {
    TeamMemberResponse {
        user: MemberUserResponse {
            url: links.user_url(&membership.username),
            username: membership.username.to_string(),
        },
        date_joined: membership.date_joined,
        last_activity_at: membership.last_activity_at,
    }
}

fn team_response(links: &PlatformLinks, team: Team) -> TeamSummaryResponse {
    TeamSummaryResponse {
        id: team.team_id.to_string(),
        name: team.name,
        description: team.description,
        course_id: team.course_id.to_string(),
        topic_id: team.topic_id.to_string(),
        date_created: team.date_created,
        last_activity_at: team.last_activity_at,
        organization_protected: team.organization_protected,
        membership: team
            .membership
            .into_iter()
            .map(|membership| member_response(links, membership))
            .collect(),
    }
}

fn topic_response(links: &PlatformLinks, summary: TopicSummary) -> TopicListingResponse {
    let TopicSummary {
        topic,
        team_count,
        teams,
    } = summary;
    TopicListingResponse {
        id: topic.id.to_string(),
        name: topic.name,
        description: topic.description,
        teamset_type: topic.teamset_type,
        max_team_size: topic.max_team_size,
        team_count,
        teams: teams
            .into_iter()
            .map(|team| team_response(links, team))
            .collect(),
    }
}

/// List the course's topics visible to the requester, with their teams.
#[utoipa::path(
    get,
    path = "/{course_id}/api/topics/",
    params(
        ("course_id" = String, Path, description = "Course key"),
        TopicsQueryParams
    ),
    responses(
        (status = 200, description = "One page of topics", body = TopicPageSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "No team API access for the course", body = ErrorSchema),
        (status = 404, description = "Malformed or unknown course, or invalid page", body = ErrorSchema)
    ),
    tags = ["topics"],
    operation_id = "listTopics"
)]
#[get("/topics/")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    requester: Requester,
    request: HttpRequest,
    path: web::Path<CoursePath>,
    query: web::Query<TopicsQueryParams>,
) -> ApiResult<web::Json<PaginatedResponse<TopicListingResponse>>> {
    let TopicsQueryParams { page, page_size } = query.into_inner();
    let page_request = PageRequest::from_query(page.as_deref(), page_size.as_deref(), state.page_limits)
        .map_err(|_| Error::not_found(INVALID_PAGE))?;

    let page = state
        .topics
        .list_topics(ListTopicsRequest {
            requester: requester.into_inner(),
            course_id: path.into_inner().course_id,
            page: page_request,
        })
        .await?;

    let links = &state.links;
    let response = page
        .map(|summary| topic_response(links, summary))
        .into_response(&request.full_url());
    Ok(web::Json(response))
}

#[cfg(test)]
#[path = "topics_tests.rs"]
mod tests;
