//! Live Asana adapter against a mock HTTP server.

use std::time::Duration;

use asana_task::adapters::live::asana::LiveAsanaApi;
use asana_task::error::{ApiError, SubmissionError};
use asana_task::ports::AsanaApi;
use asana_task::task::{
    CustomFieldValue, DraftTask, SubmitOptions, TaskCreationRequest, TaskSubmissionService,
    SIGNATURE,
};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LiveAsanaApi {
    LiveAsanaApi::new(server.uri(), "tok", Duration::from_secs(5)).unwrap()
}

fn created_body() -> serde_json::Value {
    json!({"data": {
        "gid": "1209",
        "permalink_url": "https://app.asana.com/0/0/1209",
        "name": "Ship report",
        "completed": false
    }})
}

#[tokio::test]
async fn create_sends_enveloped_request_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"data": {
            "workspace": "W1",
            "name": "Ship report",
            "custom_fields": {"111": "blue", "333": 3.0},
            "projects": ["P1"],
            "html_notes": format!("<body>Draft v1\n--\n{SIGNATURE}</body>"),
            "assignee": "U7",
            "due_on": "2024-05-01"
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = DraftTask::new("W1", "Ship report");
    draft.project_ids = vec!["P1".into()];
    draft.description = Some("Draft v1".into());
    draft.assignee_id = Some("U7".into());
    draft.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    draft.custom_field_values.insert("111".into(), CustomFieldValue::Text("blue".into()));
    draft.custom_field_values.insert("222".into(), CustomFieldValue::Text(String::new()));
    draft.custom_field_values.insert("333".into(), CustomFieldValue::Number(3.0));

    let api = client(&server);
    let task = TaskSubmissionService::new(&api)
        .submit(&draft, SubmitOptions { append_signature: true })
        .await
        .unwrap();

    assert_eq!(task.gid, "1209");
    assert_eq!(task.permalink_url, "https://app.asana.com/0/0/1209");
    assert_eq!(task.extra.get("completed"), Some(&json!(false)));
}

#[tokio::test]
async fn minimal_draft_sends_only_required_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({"data": {
            "workspace": "W1",
            "name": "Ship report",
            "custom_fields": {}
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let result = TaskSubmissionService::new(&api)
        .submit(&DraftTask::new("W1", "Ship report"), SubmitOptions { append_signature: true })
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn rejection_message_comes_from_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"message": "Invalid custom field", "help": "See the docs"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let err = TaskSubmissionService::new(&api)
        .submit(&DraftTask::new("W1", "Ship report"), SubmitOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err, SubmissionError::Rejected("Invalid custom field".into()));
}

#[tokio::test]
async fn rejection_without_payload_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let request = TaskCreationRequest::from_draft(&DraftTask::new("W1", "x"), false);
    let err = client(&server).create_task(&request).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected { status: 503, message: "Asana returned HTTP 503".into() }
    );
}

#[tokio::test]
async fn success_without_permalink_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"gid": "1"}})))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = TaskSubmissionService::new(&api)
        .submit(&DraftTask::new("W1", "x"), SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Malformed(_)));
}

#[tokio::test]
async fn non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let request = TaskCreationRequest::from_draft(&DraftTask::new("W1", "x"), false);
    let err = client(&server).create_task(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = LiveAsanaApi::new("http://127.0.0.1:1", "tok", Duration::from_secs(2)).unwrap();
    let err = TaskSubmissionService::new(&api)
        .submit(&DraftTask::new("W1", "x"), SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Network(_)));
}

#[tokio::test]
async fn slow_response_times_out_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_body())
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = LiveAsanaApi::new(server.uri(), "tok", Duration::from_millis(100)).unwrap();
    let err = TaskSubmissionService::new(&api)
        .submit(&DraftTask::new("W1", "x"), SubmitOptions::default())
        .await
        .unwrap_err();

    match err {
        SubmissionError::Network(msg) => assert!(msg.contains("timed out"), "{msg}"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn listings_follow_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workspaces/W1/projects"))
        .and(query_param("offset", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "P3", "name": "Gamma"}],
            "next_page": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workspaces/W1/projects"))
        .and(query_param("archived", "false"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "P1", "name": "Alpha"}, {"gid": "P2", "name": "Beta"}],
            "next_page": {"offset": "page-2", "path": "/workspaces/W1/projects?offset=page-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client(&server).list_projects("W1").await.unwrap();
    let gids: Vec<_> = projects.iter().map(|p| p.gid.as_str()).collect();
    assert_eq!(gids, ["P1", "P2", "P3"]);
}

#[tokio::test]
async fn custom_field_settings_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/P1/custom_field_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "gid": "setting-1",
                "custom_field": {
                    "gid": "333",
                    "name": "Priority",
                    "resource_subtype": "enum",
                    "enum_options": [{"gid": "9001", "name": "High", "enabled": true}]
                }
            }]
        })))
        .mount(&server)
        .await;

    let fields = client(&server).list_custom_field_settings("P1").await.unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].gid, "333");
    assert_eq!(fields[0].enum_options[0].gid, "9001");
}

#[tokio::test]
async fn current_user_and_users() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"gid": "U1", "name": "Ada", "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("workspace", "W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "U1", "name": "Ada"}, {"gid": "U2", "name": "Grace"}]
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let me = api.current_user().await.unwrap();
    assert_eq!(me.email.as_deref(), Some("ada@example.com"));

    let users = api.list_users("W1").await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[1].email.is_none());
}
