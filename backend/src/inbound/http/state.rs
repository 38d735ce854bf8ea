//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use pagination::PageSizeLimits;

use crate::domain::ports::{Authenticator, TeamMembershipCommand, TopicAdministration, TopicsQuery};
use crate::inbound::http::links::PlatformLinks;

/// Parameter object bundling the port implementations handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub topic_administration: Arc<dyn TopicAdministration>,
    pub topics: Arc<dyn TopicsQuery>,
    pub team_membership: Arc<dyn TeamMembershipCommand>,
    pub authenticator: Arc<dyn Authenticator>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub topic_administration: Arc<dyn TopicAdministration>,
    pub topics: Arc<dyn TopicsQuery>,
    pub team_membership: Arc<dyn TeamMembershipCommand>,
    pub authenticator: Arc<dyn Authenticator>,
    /// Builds absolute links to platform resources.
    pub links: PlatformLinks,
    /// Default and maximum page sizes for topic listing.
    pub page_limits: PageSizeLimits,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, links: PlatformLinks, page_limits: PageSizeLimits) -> Self {
        let HttpStatePorts {
            topic_administration,
            topics,
            team_membership,
            authenticator,
        } = ports;
        Self {
            topic_administration,
            topics,
            team_membership,
            authenticator,
            links,
            page_limits,
        }
    }
}
