//! End-to-end behaviour of adding users to teams over the in-memory platform.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use support::{app, authorised, course_url, platform, send};

fn add_members(token: &str, payload: Value) -> TestRequest {
    let request = TestRequest::post()
        .uri(&course_url("/team-membership/"))
        .set_json(payload);
    authorised(request, Some(token))
}

fn team_members(body: &Value, topic: usize, team: usize) -> Vec<&str> {
    body["results"][topic]["teams"][team]["membership"]
        .as_array()
        .expect("membership array")
        .iter()
        .map(|member| member["user"]["username"].as_str().expect("username"))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn learner_joins_a_team_with_space() {
    let app = app(platform()).await;

    let (status, body) = send(
        &app,
        add_members(
            "carol-token",
            json!({"team_id": "robotics-alpha", "usernames": ["carol"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"memberships": [{
            "user": {
                "url": "http://lms.test/api/user/v1/accounts/carol",
                "username": "carol"
            },
            "team": {
                "url": "http://lms.test/api/team/v0/teams/robotics-alpha",
                "team_id": "robotics-alpha"
            },
            "date_joined": "2024-06-01T09:30:00Z",
            "last_activity_at": "2024-06-01T09:30:00Z"
        }]})
    );
}

#[rstest]
#[actix_web::test]
async fn joining_another_team_in_the_teamset_moves_the_learner() {
    let platform = platform();
    let app = app(platform.clone()).await;

    let (status, body) = send(
        &app,
        add_members(
            "alice-token",
            json!({"team_id": "robotics-beta", "usernames": ["alice"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["memberships"][0]["team"]["team_id"], "robotics-beta");
    assert_eq!(platform.membership_count().await, 2);

    let list = authorised(
        TestRequest::get().uri(&course_url("/topics/")),
        Some("alice-token"),
    );
    let (status, listing) = send(&app, list).await;
    assert_eq!(status, StatusCode::OK);
    assert!(team_members(&listing, 1, 0).is_empty());
    assert_eq!(team_members(&listing, 1, 1), ["alice"]);
}

#[rstest]
#[actix_web::test]
async fn staff_fill_a_team_to_capacity() {
    let platform = platform();
    let app = app(platform.clone()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "robotics-alpha", "usernames": ["bob", "carol@example.com"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let added: Vec<&str> = body["memberships"]
        .as_array()
        .expect("memberships array")
        .iter()
        .map(|membership| membership["user"]["username"].as_str().expect("username"))
        .collect();
    assert_eq!(added, ["bob", "carol"]);
    assert_eq!(platform.membership_count().await, 4);
}

#[rstest]
#[actix_web::test]
async fn batches_that_overfill_a_team_add_nobody() {
    let platform = platform();
    let app = app(platform.clone()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "robotics-alpha", "usernames": ["bob", "carol", "dave"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": [
            "The team_id=robotics-alpha does not have enough space for the given users."
        ]})
    );
    assert_eq!(platform.membership_count().await, 2);
}

#[rstest]
#[actix_web::test]
async fn instructor_managed_teams_skip_the_capacity_check() {
    let platform = platform();
    let app = app(platform.clone()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "capstone-1", "usernames": ["alice", "carol", "dave", "staff"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["field_errors"]["usernames"],
        "The username=staff is not enrolled in the course associated with this team."
    );
    // Three learners joined past the course-wide limit of four before the
    // unenrolled user stopped the batch.
    assert_eq!(platform.membership_count().await, 5);
}

#[rstest]
#[actix_web::test]
async fn ineligible_users_stop_the_batch() {
    let platform = platform();
    let app = app(platform.clone()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "robotics-beta", "usernames": ["carol", "author", "dave"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"field_errors": {
            "usernames": "The username=author is not enrolled in the course associated with this team."
        }})
    );
    // carol was added before the failure and stays.
    assert_eq!(platform.membership_count().await, 3);
}

#[rstest]
#[actix_web::test]
async fn unknown_users_are_not_found() {
    let app = app(platform()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "robotics-beta", "usernames": ["ghost"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["field_errors"]["usernames"],
        "The username=ghost does not exist."
    );
}

#[rstest]
#[case(
    "alice-token",
    json!({"team_id": "robotics-beta", "usernames": ["bob"]}),
    "The user=alice does not have access to the Team API for the given course."
)]
#[case(
    "alice-token",
    json!({"team_id": "capstone-1", "usernames": ["alice"]}),
    "The user=alice does not have access to the specified team."
)]
#[case(
    "bob-token",
    json!({"team_id": "capstone-1", "usernames": ["bob"]}),
    "The user=bob can't join an instructor managed team."
)]
#[actix_web::test]
async fn learners_are_limited_to_their_own_open_memberships(
    #[case] token: &str,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = app(platform()).await;

    let (status, body) = send(&app, add_members(token, payload)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": [message]}));
}

#[rstest]
#[case(json!({}), &["team_id", "usernames"])]
#[case(json!({"team_id": "  ", "usernames": ["bob"]}), &["team_id"])]
#[case(json!({"team_id": "robotics-beta", "usernames": []}), &["usernames"])]
#[actix_web::test]
async fn missing_inputs_are_reported_per_field(#[case] payload: Value, #[case] fields: &[&str]) {
    let app = app(platform()).await;

    let (status, body) = send(&app, add_members("staff-token", payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let reported: Vec<&str> = body["field_errors"]
        .as_object()
        .expect("field errors")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(reported, fields);
}

#[rstest]
#[actix_web::test]
async fn unknown_teams_are_not_found() {
    let app = app(platform()).await;

    let (status, body) = send(
        &app,
        add_members(
            "staff-token",
            json!({"team_id": "nope", "usernames": ["bob"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["field_errors"]["team_id"],
        "The supplied team_id=nope does not exist."
    );
}
