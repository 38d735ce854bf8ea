//! Shared harness for HTTP integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the wiring the binary performs is repeated here: the shipped platform
//! fixture is loaded into an [`InMemoryPlatform`] with a frozen clock and the
//! route groups are mounted under the default prefix.

use std::path::PathBuf;
use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use pagination::PageSizeLimits;
use serde_json::Value;
use url::Url;

use teams_plugin::Trace;
use teams_plugin::domain::{TeamMembershipService, TopicAdministrationService, TopicsQueryService};
use teams_plugin::inbound::http::links::PlatformLinks;
use teams_plugin::inbound::http::routes::{self, ServiceVariant};
use teams_plugin::inbound::http::state::{HttpState, HttpStatePorts};
use teams_plugin::outbound::memory::{InMemoryPlatform, PlatformFixture};

pub const PREFIX: &str = "/platform-plugin-teams";
pub const COURSE: &str = "course-v1:OrgX+CS101+2024";

/// Instant every membership created during a test is stamped with.
pub fn frozen_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("platform.json")
}

/// Platform seeded from `fixtures/platform.json`.
pub fn platform() -> Arc<InMemoryPlatform> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(frozen_now);
    let fixture = PlatformFixture::from_path(&fixture_path()).expect("fixture loads");
    Arc::new(InMemoryPlatform::from_fixture(fixture, Arc::new(clock)).expect("fixture is consistent"))
}

fn http_state(platform: Arc<InMemoryPlatform>) -> HttpState {
    HttpState::new(
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
        },
        PlatformLinks::new(Url::parse("http://lms.test").expect("valid base url")),
        PageSizeLimits::new(12, 100),
    )
}

/// Initialise the full application over `platform`.
pub async fn app(
    platform: Arc<InMemoryPlatform>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(platform)))
            .wrap(session)
            .wrap(Trace)
            .configure(|cfg| routes::configure(cfg, PREFIX, ServiceVariant::Both)),
    )
    .await
}

pub fn course_url(suffix: &str) -> String {
    format!("{PREFIX}/{COURSE}/api{suffix}")
}

/// Attach `Authorization: Bearer {token}` when a token is given.
pub fn authorised(request: test::TestRequest, token: Option<&str>) -> test::TestRequest {
    match token {
        Some(token) => request.insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    }
}

/// Send `request` and decode the JSON body.
pub async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let json = serde_json::from_slice(&body).expect("json body");
    (status, json)
}
