//! End-to-end behaviour of topic creation and deletion over the in-memory
//! platform.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use support::{app, authorised, course_url, platform, send};

fn topic_names(body: &Value) -> Vec<&str> {
    body["topics"]
        .as_array()
        .expect("topics array")
        .iter()
        .map(|topic| topic["name"].as_str().expect("topic name"))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn author_creates_a_topic() {
    let app = app(platform()).await;
    let request = TestRequest::post().uri(&course_url("/cms/topics/")).set_json(json!({
        "name": "Data science",
        "description": "Crunch numbers together.",
        "type": "open",
        "max_team_size": 5
    }));

    let (status, body) = send(&app, authorised(request, Some("author-token"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        topic_names(&body),
        ["Robotics", "AI ethics", "Capstone", "Data science"]
    );
    let created = &body["topics"][3];
    assert_eq!(created["type"], "open");
    assert_eq!(created["max_team_size"], 5);
    assert_eq!(created["description"], "Crunch numbers together.");
    assert!(!created["id"].as_str().expect("id").is_empty());
}

#[rstest]
#[actix_web::test]
async fn created_topic_appears_in_the_learner_listing() {
    let app = app(platform()).await;
    let create = TestRequest::post().uri(&course_url("/cms/topics/")).set_json(json!({
        "name": "Biology",
        "description": "",
        "type": "open"
    }));
    let (status, _) = send(&app, authorised(create, Some("staff-token"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let list = TestRequest::get().uri(&course_url("/topics/"));
    let (status, body) = send(&app, authorised(list, Some("alice-token"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][1]["name"], "Biology");
    assert_eq!(body["results"][1]["team_count"], 0);
}

#[rstest]
#[actix_web::test]
async fn second_topic_with_the_same_name_is_rejected() {
    let app = app(platform()).await;
    let first = TestRequest::post().uri(&course_url("/cms/topics/")).set_json(json!({
        "name": "Data science",
        "description": "d",
        "type": "open",
        "max_team_size": 4
    }));
    let (status, _) = send(&app, authorised(first, Some("author-token"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = TestRequest::post()
        .uri(&course_url("/cms/topics/"))
        .set_json(json!({"name": "data science", "description": "d", "type": "open"}));
    let (status, body) = send(&app, authorised(second, Some("author-token"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"field_errors": {"name": "The topic with name=data science already exists."}})
    );
}

#[rstest]
#[case(json!({"name": "ROBOTICS", "description": "", "type": "open"}), "name", "The topic with name=robotics already exists.")]
#[case(json!({"name": "Chemistry", "description": "", "type": "closed"}), "type", "The [type] field must be one of [open, public_managed, private_managed, open_managed].")]
#[case(json!({"description": "", "type": "open"}), "name", "The [name] field is required.")]
#[case(json!({"name": "Chemistry", "type": "open", "max_team_size": 0}), "max_team_size", "The [max_team_size] field must be a positive integer.")]
#[actix_web::test]
async fn invalid_topics_are_rejected(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    let platform = platform();
    let app = app(platform).await;
    let request = TestRequest::post()
        .uri(&course_url("/cms/topics/"))
        .set_json(payload);

    let (status, body) = send(&app, authorised(request, Some("author-token"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"][field], message);
}

#[rstest]
#[actix_web::test]
async fn learners_cannot_create_topics() {
    let app = app(platform()).await;
    let request = TestRequest::post()
        .uri(&course_url("/cms/topics/"))
        .set_json(json!({"name": "Chemistry", "type": "open"}));

    let (status, body) = send(&app, authorised(request, Some("alice-token"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({"error": ["You do not have permission to perform this action."]})
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_course_is_not_found() {
    let app = app(platform()).await;
    let request = TestRequest::post()
        .uri("/platform-plugin-teams/course-v1:OrgX+NOPE+2024/api/cms/topics/")
        .set_json(json!({"name": "Chemistry", "type": "open"}));

    let (status, body) = send(&app, authorised(request, Some("staff-token"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["field_errors"]["course_id"],
        "The supplied course_id=course-v1:OrgX+NOPE+2024 is not found."
    );
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised() {
    let app = app(platform()).await;
    let request = TestRequest::post()
        .uri(&course_url("/cms/topics/"))
        .set_json(json!({"name": "Chemistry", "type": "open"}));

    let (status, _) = send(&app, authorised(request, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_topic_removes_its_teams_and_memberships() {
    let platform = platform();
    let app = app(platform.clone()).await;
    assert_eq!(platform.membership_count().await, 2);

    let request = TestRequest::delete().uri(&course_url("/cms/topics/robotics/"));
    let (status, body) = send(&app, authorised(request, Some("staff-token"))).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(topic_names(&body), ["AI ethics", "Capstone"]);
    assert_eq!(platform.membership_count().await, 1);

    let join = TestRequest::post()
        .uri(&course_url("/team-membership/"))
        .set_json(json!({"team_id": "robotics-beta", "usernames": ["carol"]}));
    let (status, body) = send(&app, authorised(join, Some("staff-token"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["field_errors"]["team_id"],
        "The supplied team_id=robotics-beta does not exist."
    );
}

#[rstest]
#[actix_web::test]
async fn deleting_an_unknown_topic_is_not_found() {
    let app = app(platform()).await;
    let request = TestRequest::delete().uri(&course_url("/cms/topics/nope/"));

    let (status, body) = send(&app, authorised(request, Some("author-token"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["field_errors"]["topic_id"],
        "The supplied topic_id=nope is not found."
    );
}
