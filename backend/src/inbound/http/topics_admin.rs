//! Authoring-side topic management handlers.
//!
//! ```text
//! POST   {prefix}/{course_id}/api/cms/topics/
//! DELETE {prefix}/{course_id}/api/cms/topics/{topic_id}/
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateTopicRequest, DeleteTopicRequest, TopicDraft};
use crate::domain::{TeamsetType, Topic, TopicId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Requester;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body of a topic creation request.
///
/// Fields stay optional so validation can report them in a fixed order.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TopicPayload {
    #[schema(example = "Robotics")]
    pub name: Option<String>,
    pub description: Option<String>,
    /// One of `open`, `public_managed`, `private_managed`, `open_managed`.
    #[serde(rename = "type")]
    #[schema(example = "open")]
    pub teamset_type: Option<String>,
    #[schema(example = 4)]
    pub max_team_size: Option<i64>,
}

impl From<TopicPayload> for TopicDraft {
    fn from(value: TopicPayload) -> Self {
        Self {
            name: value.name,
            description: value.description,
            teamset_type: value.teamset_type,
            max_team_size: value.max_team_size,
        }
    }
}

/// Topic as rendered to authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub teamset_type: TeamsetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_team_size: Option<u32>,
}

impl From<Topic> for TopicResponse {
    fn from(value: Topic) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            teamset_type: value.teamset_type,
            max_team_size: value.max_team_size,
        }
    }
}

/// The course's topic list after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<TopicResponse>,
}

impl From<Vec<Topic>> for TopicsResponse {
    fn from(value: Vec<Topic>) -> Self {
        Self {
            topics: value.into_iter().map(TopicResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CoursePath {
    pub course_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicPath {
    pub course_id: String,
    pub topic_id: String,
}

/// Create a topic on a course.
#[utoipa::path(
    post,
    path = "/{course_id}/api/cms/topics/",
    request_body = TopicPayload,
    params(("course_id" = String, Path, description = "Course key, e.g. course-v1:OrgX+CS101+2024")),
    responses(
        (status = 201, description = "Topic created; full topic list returned", body = TopicsResponse),
        (status = 400, description = "Invalid type, blank or duplicate name", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "No studio write access", body = ErrorSchema),
        (status = 404, description = "Malformed or unknown course", body = ErrorSchema)
    ),
    tags = ["topics"],
    operation_id = "createTopic"
)]
#[post("/topics/")]
pub async fn create_topic(
    state: web::Data<HttpState>,
    requester: Requester,
    path: web::Path<CoursePath>,
    payload: web::Json<TopicPayload>,
) -> ApiResult<HttpResponse> {
    let topics = state
        .topic_administration
        .create_topic(CreateTopicRequest {
            requester: requester.into_inner(),
            course_id: path.into_inner().course_id,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(TopicsResponse::from(topics)))
}

/// Delete a topic together with its teams and their memberships.
///
/// Responds `204` and still carries the remaining topics, which the
/// authoring frontend reads.
#[utoipa::path(
    delete,
    path = "/{course_id}/api/cms/topics/{topic_id}/",
    params(
        ("course_id" = String, Path, description = "Course key"),
        ("topic_id" = String, Path, description = "Topic identifier")
    ),
    responses(
        (status = 204, description = "Topic deleted; remaining topics returned", body = TopicsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "No studio write access", body = ErrorSchema),
        (status = 404, description = "Malformed or unknown course or topic", body = ErrorSchema)
    ),
    tags = ["topics"],
    operation_id = "deleteTopic"
)]
#[delete("/topics/{topic_id}/")]
pub async fn delete_topic(
    state: web::Data<HttpState>,
    requester: Requester,
    path: web::Path<TopicPath>,
) -> ApiResult<HttpResponse> {
    let TopicPath {
        course_id,
        topic_id,
    } = path.into_inner();
    let topics = state
        .topic_administration
        .delete_topic(DeleteTopicRequest {
            requester: requester.into_inner(),
            course_id,
            topic_id: TopicId::new(topic_id),
        })
        .await?;
    Ok(HttpResponse::NoContent().json(TopicsResponse::from(topics)))
}

#[cfg(test)]
#[path = "topics_admin_tests.rs"]
mod tests;
