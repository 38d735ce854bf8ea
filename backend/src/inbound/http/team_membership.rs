//! Team membership handler.
//!
//! ```text
//! POST {prefix}/{course_id}/api/team-membership/ {"team_id":"t1","usernames":["alice"]}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Membership;
use crate::domain::ports::AddMembersRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Requester;
use crate::inbound::http::links::PlatformLinks;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Users to add to a team. Entries in `usernames` may also be emails.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddMembersPayload {
    #[schema(example = "t1")]
    pub team_id: Option<String>,
    #[schema(example = json!(["alice", "bob@example.com"]))]
    pub usernames: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipUserResponse {
    pub url: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipTeamResponse {
    pub url: String,
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    pub user: MembershipUserResponse,
    pub team: MembershipTeamResponse,
    pub date_joined: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipsResponse {
    pub memberships: Vec<MembershipResponse>,
}

impl MembershipResponse {
    fn render(links: &PlatformLinks, membership: Membership) -> Self {
        Self {
            user: MembershipUserResponse {
                url: links.user_url(&membership.username),
                username: membership.username.to_string(),
            },
            team: MembershipTeamResponse {
                url: links.team_url(&membership.team_id),
                team_id: membership.team_id.to_string(),
            },
            date_joined: membership.date_joined,
            last_activity_at: membership.last_activity_at,
        }
    }
}

/// Add users to a team, moving them out of other teams in the same teamset.
#[utoipa::path(
    post,
    path = "/{course_id}/api/team-membership/",
    request_body = AddMembersPayload,
    params(("course_id" = String, Path, description = "Course key")),
    responses(
        (status = 201, description = "Memberships created", body = MembershipsResponse),
        (status = 400, description = "Missing fields, team full, or user not enrolled", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "No access to the team or the Team API", body = ErrorSchema),
        (status = 404, description = "Unknown team or user", body = ErrorSchema)
    ),
    tags = ["team-membership"],
    operation_id = "addTeamMembers"
)]
#[post("/team-membership/")]
pub async fn add_members(
    state: web::Data<HttpState>,
    requester: Requester,
    payload: web::Json<AddMembersPayload>,
) -> ApiResult<HttpResponse> {
    let AddMembersPayload { team_id, usernames } = payload.into_inner();
    let memberships = state
        .team_membership
        .add_members(AddMembersRequest {
            requester: requester.into_inner(),
            team_id,
            usernames,
        })
        .await?;
    let links = &state.links;
    Ok(HttpResponse::Created().json(MembershipsResponse {
        memberships: memberships
            .into_iter()
            .map(|membership| MembershipResponse::render(links, membership))
            .collect(),
    }))
}
