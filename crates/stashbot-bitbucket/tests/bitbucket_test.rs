//! Integration tests for the Bitbucket Server client.
//!
//! These run the real [`ReqwestExecutor`] against an in-process mock
//! server, so the full request path is exercised: URL construction,
//! bearer header, JSON bodies, and response decoding.

use httpmock::prelude::*;
use serde_json::json;
use stashbot_bitbucket::{BitbucketClient, ReqwestExecutor};
use stashbot_core::Error;

fn client(server: &MockServer) -> BitbucketClient<ReqwestExecutor> {
    BitbucketClient::new(ReqwestExecutor::new(), server.base_url(), "secret-token")
}

fn pull_request_list() -> serde_json::Value {
    json!({
        "size": 2,
        "isLastPage": true,
        "values": [
            {
                "id": 1,
                "state": "OPEN",
                "fromRef": {"id": "refs/heads/feature-x", "displayId": "feature-x"},
                "author": {"user": {"name": "alice"}},
                "reviewers": [{"user": {"name": "bob"}}]
            },
            {
                "id": 2,
                "state": "OPEN",
                "fromRef": {"id": "refs/heads/feature-y", "displayId": "feature-y"},
                "author": {"user": {"name": "carol"}},
                "reviewers": []
            }
        ]
    })
}

#[tokio::test]
async fn test_find_pull_request_id_by_branch() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/1.0/projects/PROJ/repos/repo/pull-requests")
                .header("Authorization", "Bearer secret-token");
            then.status(200).json_body(pull_request_list());
        })
        .await;

    let client = client(&server);
    let id = client
        .find_pull_request_id_by_branch("feature-y", "PROJ", "repo")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(id, Some(2));
}

#[tokio::test]
async fn test_find_pull_request_id_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/1.0/projects/PROJ/repos/repo/pull-requests");
            then.status(200).json_body(pull_request_list());
        })
        .await;

    let client = client(&server);
    let id = client
        .find_pull_request_id_by_branch("feature-z", "PROJ", "repo")
        .await
        .unwrap();

    assert_eq!(id, None);
}

#[tokio::test]
async fn test_find_branches_with_open_pull_requests() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/1.0/projects/PROJ/repos/repo/pull-requests")
                .header("Authorization", "Bearer secret-token");
            then.status(200).json_body(pull_request_list());
        })
        .await;

    let client = client(&server);
    let branches = client
        .find_branches_with_open_pull_requests("PROJ", "repo", &["bob".to_string()])
        .await
        .unwrap();

    assert_eq!(branches.len(), 1);
    assert_eq!(branches.get(&1), Some(&"feature-x".to_string()));
}

#[tokio::test]
async fn test_create_comment() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/1.0/projects/PROJ/repos/repo/pull-requests/1/comments")
                .header("Authorization", "Bearer secret-token")
                .json_body(json!({"text": "Looks good"}));
            then.status(201).json_body(json!({"id": 555, "version": 0}));
        })
        .await;

    let client = client(&server);
    let id = client
        .create_comment("PROJ", "repo", 1, "Looks good")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(id, 555);
}

#[tokio::test]
async fn test_create_task_for_comment() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/1.0/tasks")
                .header("Authorization", "Bearer secret-token")
                .json_body(json!({
                    "anchor": {"id": 555, "type": "COMMENT"},
                    "text": "Please fix the typo"
                }));
            then.status(201).json_body(json!({"id": 9000}));
        })
        .await;

    let client = client(&server);
    client
        .create_task_for_comment(555, "Please fix the typo")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/1.0/projects/PROJ/repos/missing/pull-requests");
            then.status(404)
                .json_body(json!({"errors": [{"message": "Repository does not exist"}]}));
        })
        .await;

    let client = client(&server);
    let result = client
        .find_pull_request_id_by_branch("feature-x", "PROJ", "missing")
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Repository does not exist"));
        }
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }
}
