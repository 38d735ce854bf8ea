//! Handler tests for topic listing.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::TimeZone;
use pagination::PageSizeLimits;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{CourseKey, TeamId, Topic, TopicId, Username};
use crate::inbound::http::test_utils::{TEST_TOKEN, TestPorts, authenticator_for, user};

const COURSE_ID: &str = "course-v1:OrgX+CS101+2024";

fn joined_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn summary(name: &str, teams: Vec<Team>) -> TopicSummary {
    TopicSummary {
        topic: Topic {
            id: TopicId::new(name.to_lowercase()),
            name: name.to_owned(),
            description: format!("{name} projects"),
            teamset_type: TeamsetType::Open,
            max_team_size: Some(4),
        },
        team_count: teams.len(),
        teams,
    }
}

fn team_with_member(team_id: &str, topic_id: &str, member: &str) -> Team {
    let team_id = TeamId::new(team_id);
    Team {
        team_id: team_id.clone(),
        name: "Red".to_owned(),
        description: String::new(),
        course_id: CourseKey::parse(COURSE_ID).expect("valid key"),
        topic_id: TopicId::new(topic_id),
        organization_protected: false,
        date_created: joined_at(),
        last_activity_at: joined_at(),
        membership: vec![Membership {
            username: Username::new(member).expect("valid username"),
            team_id,
            date_joined: joined_at(),
            last_activity_at: joined_at(),
        }],
    }
}

fn learner_ports() -> TestPorts {
    TestPorts {
        authenticator: authenticator_for(user("alice")),
        ..TestPorts::default()
    }
}

async fn get(ports: TestPorts, uri: &str) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/{course_id}/api").service(list_topics)),
    )
    .await;
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {TEST_TOKEN}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let body = test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn renders_envelope_with_team_rollups() {
    let mut ports = learner_ports();
    ports
        .topics
        .expect_list_topics()
        .withf(|request| {
            request.course_id == COURSE_ID
                && request.requester.username.as_ref() == "alice"
                && request.page.size() == 1
        })
        .times(1)
        .returning(|request| {
            let summaries = vec![
                summary("Art", vec![team_with_member("red", "art", "bob")]),
                summary("Robotics", Vec::new()),
            ];
            Ok(request.page.slice(summaries).expect("page in range"))
        });

    let (status, body) = get(ports, &format!("/{COURSE_ID}/api/topics/?page_size=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["num_pages"], 2);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["previous"], Value::Null);
    let next = body["next"].as_str().expect("next link");
    assert!(next.ends_with("page_size=1&page=2"), "unexpected next link {next}");

    let topic = &body["results"][0];
    assert_eq!(topic["id"], "art");
    assert_eq!(topic["type"], "open");
    assert_eq!(topic["max_team_size"], 4);
    assert_eq!(topic["team_count"], 1);
    assert_eq!(
        topic["teams"][0]["membership"][0]["user"],
        json!({"username": "bob", "url": "http://lms.test/api/user/v1/accounts/bob"})
    );
    assert_eq!(topic["teams"][0]["topic_id"], "art");
    assert_eq!(topic["teams"][0]["course_id"], COURSE_ID);
}

#[rstest]
#[case("abc")]
#[case("0")]
#[actix_web::test]
async fn malformed_page_is_not_found(#[case] page: &str) {
    let (status, body) = get(learner_ports(), &format!("/{COURSE_ID}/api/topics/?page={page}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": ["Invalid page."]}));
}

#[rstest]
#[actix_web::test]
async fn page_size_is_capped_by_configured_limits() {
    let mut ports = learner_ports();
    let limits = PageSizeLimits::new(2, 10);
    ports
        .topics
        .expect_list_topics()
        .withf(move |request| request.page.size() == limits.max_size())
        .returning(|request| Ok(request.page.slice(Vec::new()).expect("empty first page")));

    let (status, body) = get(ports, &format!("/{COURSE_ID}/api/topics/?page_size=500")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn propagates_forbidden() {
    let mut ports = learner_ports();
    ports.topics.expect_list_topics().returning(|request| {
        Err(Error::forbidden(format!(
            "The user={} does not have access to the Team API for the given course.",
            request.requester.username
        )))
    });

    let (status, body) = get(ports, &format!("/{COURSE_ID}/api/topics/")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({"error": ["The user=alice does not have access to the Team API for the given course."]})
    );
}
