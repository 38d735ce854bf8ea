//! OpenAPI documentation for the teams endpoints.
//!
//! Paths are documented relative to the configured URL prefix. The document
//! is served by Swagger UI in debug builds and exported by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::team_membership::{
    AddMembersPayload, MembershipResponse, MembershipTeamResponse, MembershipUserResponse,
    MembershipsResponse,
};
use crate::inbound::http::topics::{
    MemberUserResponse, TeamMemberResponse, TeamSummaryResponse, TopicListingResponse,
    TopicPageSchema,
};
use crate::inbound::http::topics_admin::{TopicPayload, TopicResponse, TopicsResponse};

/// Registers the bearer token and platform session cookie schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the host platform.",
            ))),
        );
    }
}

/// OpenAPI document for the teams API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course teams plugin API",
        description = "Topic administration, topic listing and team membership endpoints."
    ),
    servers(
        (url = "/platform-plugin-teams", description = "Default URL prefix")
    ),
    security(("BearerToken" = []), ("SessionCookie" = [])),
    paths(
        crate::inbound::http::topics_admin::create_topic,
        crate::inbound::http::topics_admin::delete_topic,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::team_membership::add_members,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        TopicPayload,
        TopicResponse,
        TopicsResponse,
        TopicListingResponse,
        TopicPageSchema,
        TeamSummaryResponse,
        TeamMemberResponse,
        MemberUserResponse,
        AddMembersPayload,
        MembershipsResponse,
        MembershipResponse,
        MembershipUserResponse,
        MembershipTeamResponse,
    )),
    tags(
        (name = "topics", description = "Teamsets configured on a course"),
        (name = "team-membership", description = "Adding users to teams"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
