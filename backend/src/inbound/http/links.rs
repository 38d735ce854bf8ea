//! Absolute links to resources owned by the host platform.

use url::Url;

use crate::domain::{TeamId, Username};

/// Renders the `url` fields of users and teams in responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLinks {
    base: Url,
}

impl PlatformLinks {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Account detail link for `username`.
    pub fn user_url(&self, username: &Username) -> String {
        self.resource_url(&["api", "user", "v1", "accounts", username.as_ref()])
    }

    /// Team detail link for `team_id`.
    pub fn team_url(&self, team_id: &TeamId) -> String {
        self.resource_url(&["api", "team", "v0", "teams", team_id.as_ref()])
    }

    fn resource_url(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        match url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty().extend(segments);
            }
            // Bases such as `data:` URLs cannot carry a path; fall back to
            // plain concatenation.
            Err(()) => return format!("{}/{}", self.base, segments.join("/")),
        }
        url.to_string()
    }
}
