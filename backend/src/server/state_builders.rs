//! Builders wiring the platform adapter into the HTTP state.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use teams_plugin::domain::{TeamMembershipService, TopicAdministrationService, TopicsQueryService};
use teams_plugin::inbound::http::state::{HttpState, HttpStatePorts};
use teams_plugin::outbound::memory::{FixtureError, InMemoryPlatform, PlatformFixture};

use super::ServerConfig;

/// Load the platform from `fixture_path`, or start empty when none is
/// configured.
pub(super) fn build_platform(
    fixture_path: Option<&Path>,
    clock: Arc<dyn Clock>,
) -> Result<InMemoryPlatform, FixtureError> {
    match fixture_path {
        Some(path) => {
            let fixture = PlatformFixture::from_path(path)?;
            info!(
                path = %path.display(),
                courses = fixture.courses.len(),
                teams = fixture.teams.len(),
                "loaded platform fixture"
            );
            InMemoryPlatform::from_fixture(fixture, clock)
        }
        None => {
            warn!("no platform fixture configured; starting with an empty platform");
            Ok(InMemoryPlatform::new(clock))
        }
    }
}

/// Build the three services over one shared platform.
pub(super) fn build_ports(platform: Arc<InMemoryPlatform>) -> HttpStatePorts {
    HttpStatePorts {
        topic_administration: Arc::new(TopicAdministrationService::new(
            platform.clone(),
            platform.clone(),
            platform.clone(),
            platform.clone(),
        )),
        topics: Arc::new(TopicsQueryService::new(
            platform.clone(),
            platform.clone(),
            platform.clone(),
        )),
        team_membership: Arc::new(TeamMembershipService::new(
            platform.clone(),
            platform.clone(),
            platform.clone(),
            platform.clone(),
            platform.clone(),
        )),
        authenticator: platform,
    }
}

/// Build the shared HTTP state from configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let platform = build_platform(config.fixture_path.as_deref(), Arc::new(DefaultClock))
        .map_err(|err| std::io::Error::other(format!("platform fixture: {err}")))?;
    Ok(web::Data::new(HttpState::new(
        build_ports(Arc::new(platform)),
        config.links.clone(),
        config.page_limits,
    )))
}
