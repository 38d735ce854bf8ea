//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use pagination::PageSizeLimits;
use url::Url;

use crate::domain::ports::{
    Credential, MockAuthenticator, MockTeamMembershipCommand, MockTopicAdministration,
    MockTopicsQuery,
};
use crate::domain::{User, Username};
use crate::inbound::http::links::PlatformLinks;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Bearer token accepted by [`authenticator_for`].
pub const TEST_TOKEN: &str = "test-token";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub fn user(name: &str) -> User {
    User {
        username: Username::new(name).expect("valid username"),
        email: format!("{name}@example.com"),
    }
}

/// Authenticator resolving [`TEST_TOKEN`] to `user` and rejecting anything
/// else.
pub fn authenticator_for(user: User) -> MockAuthenticator {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .returning(move |credential| {
            Ok(match credential {
                Credential::Bearer(token) if token.as_str() == TEST_TOKEN => Some(user.clone()),
                _ => None,
            })
        });
    authenticator
}

/// Mocked driving ports; unset expectations fail the test when called.
#[derive(Default)]
pub struct TestPorts {
    pub topic_administration: MockTopicAdministration,
    pub topics: MockTopicsQuery,
    pub team_membership: MockTeamMembershipCommand,
    pub authenticator: MockAuthenticator,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                topic_administration: Arc::new(self.topic_administration),
                topics: Arc::new(self.topics),
                team_membership: Arc::new(self.team_membership),
                authenticator: Arc::new(self.authenticator),
            },
            PlatformLinks::new(Url::parse("http://lms.test").expect("valid base url")),
            PageSizeLimits::new(2, 10),
        )
    }
}
