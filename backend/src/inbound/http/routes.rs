//! Route groups mounted under the plugin prefix.
//!
//! Authoring routes live under `{prefix}/{course_id}/api/cms` and learner
//! routes under `{prefix}/{course_id}/api`. Actix picks the first scope whose
//! prefix matches and never falls through, so the authoring scope must be
//! registered first.

use std::fmt;
use std::str::FromStr;

use actix_web::{Scope, web};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::team_membership::add_members;
use crate::inbound::http::topics::list_topics;
use crate::inbound::http::topics_admin::{create_topic, delete_topic};

/// Which host context this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceVariant {
    /// Learner-facing routes only.
    Lms,
    /// Authoring routes only.
    Cms,
    #[default]
    Both,
}

impl ServiceVariant {
    pub fn serves_authoring(self) -> bool {
        matches!(self, Self::Cms | Self::Both)
    }

    pub fn serves_learners(self) -> bool {
        matches!(self, Self::Lms | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown service variant {0:?}; expected lms, cms or both")]
pub struct UnknownServiceVariant(pub String);

impl FromStr for ServiceVariant {
    type Err = UnknownServiceVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lms" => Ok(Self::Lms),
            "cms" => Ok(Self::Cms),
            "both" => Ok(Self::Both),
            _ => Err(UnknownServiceVariant(s.to_owned())),
        }
    }
}

impl fmt::Display for ServiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lms => "lms",
            Self::Cms => "cms",
            Self::Both => "both",
        })
    }
}

fn course_path(prefix: &str, suffix: &str) -> String {
    format!("{}/{{course_id}}/api{suffix}", prefix.trim_end_matches('/'))
}

/// Topic creation and deletion.
pub fn authoring_scope(prefix: &str) -> Scope {
    web::scope(&course_path(prefix, "/cms"))
        .service(create_topic)
        .service(delete_topic)
}

/// Topic listing and team membership.
pub fn learner_scope(prefix: &str) -> Scope {
    web::scope(&course_path(prefix, ""))
        .service(list_topics)
        .service(add_members)
}

/// Register the route groups `variant` serves, with JSON and query error
/// handlers attached.
pub fn configure(cfg: &mut web::ServiceConfig, prefix: &str, variant: ServiceVariant) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
    if variant.serves_authoring() {
        cfg.service(authoring_scope(prefix));
    }
    if variant.serves_learners() {
        cfg.service(learner_scope(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lms", ServiceVariant::Lms)]
    #[case("CMS", ServiceVariant::Cms)]
    #[case(" both ", ServiceVariant::Both)]
    fn parses_variants(#[case] raw: &str, #[case] expected: ServiceVariant) {
        assert_eq!(raw.parse::<ServiceVariant>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_variant() {
        assert!("studio".parse::<ServiceVariant>().is_err());
    }

    #[rstest]
    #[case("/platform-plugin-teams", "/platform-plugin-teams/{course_id}/api/cms")]
    #[case("/platform-plugin-teams/", "/platform-plugin-teams/{course_id}/api/cms")]
    #[case("", "/{course_id}/api/cms")]
    fn builds_course_scoped_paths(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(course_path(prefix, "/cms"), expected);
    }
}
