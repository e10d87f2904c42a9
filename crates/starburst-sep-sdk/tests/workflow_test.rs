// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workflow trigger and polling tests against a mock SEP server.

use std::time::Duration;

use serde_json::json;
use starburst_sep_sdk::{
    AuthConfig, PollConfig, Protocol, SdkError, SepClient, SepConfig, WorkflowHandle, WorkflowKind,
    WorkflowState,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLISH_PATH: &str = "/api/v1/dataProduct/products/dp-1/workflows/publish";
const DELETE_PATH: &str = "/api/v1/dataProduct/products/dp-1/workflows/delete";
const REFRESH_PATH: &str = "/api/v1/dataProduct/products/dp-1/materializedViews/daily/refresh";

fn client(server: &MockServer) -> SepClient {
    let config = SepConfig::new(
        server.address().to_string(),
        AuthConfig::basic("alice", "secret"),
    )
    .with_protocol(Protocol::Http)
    .with_poll(fast_poll());
    SepClient::new(config).unwrap()
}

fn fast_poll() -> PollConfig {
    PollConfig::new(Duration::from_millis(10), Duration::from_secs(5))
}

fn status(workflow_type: &str, state: &str, is_final: bool) -> serde_json::Value {
    json!({
        "workflowType": workflow_type,
        "status": state,
        "errors": [],
        "isFinalStatus": is_final
    })
}

async fn mount_status_sequence(
    server: &MockServer,
    status_path: &str,
    running: u64,
    last: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(status_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("PUBLISH", "IN_PROGRESS", false)),
        )
        .up_to_n_times(running)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(status_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(last))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_publish_follows_relative_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PUBLISH_PATH))
        .and(query_param("force", "false"))
        .respond_with(ResponseTemplate::new(202).insert_header("Location", PUBLISH_PATH))
        .expect(1)
        .mount(&server)
        .await;
    mount_status_sequence(
        &server,
        PUBLISH_PATH,
        2,
        status("PUBLISH", "COMPLETED", true),
    )
    .await;

    let client = client(&server);
    let handle = client.publish_data_product("dp-1", false).await.unwrap();
    assert_eq!(handle.kind, WorkflowKind::Publish);
    assert_eq!(handle.location.path(), PUBLISH_PATH);

    let mut seen = Vec::new();
    let status = client
        .wait_for_workflow_with_progress(&handle, None, |s| seen.push(s.status.clone()))
        .await
        .unwrap();

    assert_eq!(status.status, WorkflowState::Completed);
    assert_eq!(
        seen,
        vec![
            WorkflowState::InProgress,
            WorkflowState::InProgress,
            WorkflowState::Completed
        ]
    );
}

#[tokio::test]
async fn test_publish_follows_absolute_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PUBLISH_PATH))
        .and(query_param("force", "true"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", format!("{}/status/wf-42", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_status_sequence(
        &server,
        "/status/wf-42",
        1,
        status("PUBLISH", "COMPLETED", true),
    )
    .await;

    let status = client(&server)
        .publish_data_product_and_wait("dp-1", true, None)
        .await
        .unwrap();
    assert!(status.is_final_status);
}

#[tokio::test]
async fn test_publish_without_location_polls_canonical_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PUBLISH_PATH))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let handle = client(&server)
        .publish_data_product("dp-1", false)
        .await
        .unwrap();
    assert_eq!(handle.location.path(), PUBLISH_PATH);
}

#[tokio::test]
async fn test_completed_without_final_flag_keeps_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("PUBLISH", "COMPLETED", false)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("PUBLISH", "COMPLETED", true)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let mut checks = 0;
    client
        .wait_for_workflow_with_progress(
            &WorkflowHandle {
                kind: WorkflowKind::Publish,
                location: client.base_url().join(PUBLISH_PATH).unwrap(),
            },
            None,
            |_| checks += 1,
        )
        .await
        .unwrap();
    assert_eq!(checks, 2);
}

#[tokio::test]
async fn test_delete_error_reports_entity_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DELETE_PATH))
        .and(query_param("skipTrinoDelete", "true"))
        .respond_with(ResponseTemplate::new(202).insert_header("Location", DELETE_PATH))
        .expect(1)
        .mount(&server)
        .await;
    mount_status_sequence(
        &server,
        DELETE_PATH,
        1,
        json!({
            "workflowType": "DELETE",
            "status": "ERROR",
            "isFinalStatus": true,
            "errors": [
                {"entityType": "VIEW", "entityName": "orders_v", "message": "Access Denied"},
                {"entityType": "SCHEMA", "entityName": "orders_dp", "message": "Schema not empty"}
            ]
        }),
    )
    .await;

    let err = client(&server)
        .delete_data_product_and_wait("dp-1", true, None)
        .await
        .unwrap_err();

    match err {
        SdkError::Workflow {
            workflow_type,
            errors,
        } => {
            assert_eq!(workflow_type, "DELETE");
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[1].message, "Schema not empty");
        }
        other => panic!("expected workflow error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_requires_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let err = client(&server)
        .refresh_materialized_view("dp-1", "daily")
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::MissingLocation(_)));
}

#[tokio::test]
async fn test_refresh_and_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(202).insert_header("Location", "/status/refresh-7"))
        .mount(&server)
        .await;
    mount_status_sequence(
        &server,
        "/status/refresh-7",
        1,
        status("REFRESH", "COMPLETED", true),
    )
    .await;

    let status = client(&server)
        .refresh_materialized_view_and_wait("dp-1", "daily", None)
        .await
        .unwrap();
    assert_eq!(status.workflow_type, "REFRESH");
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("PUBLISH", "COMPLETED", true)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let handle = WorkflowHandle {
        kind: WorkflowKind::Publish,
        location: client.base_url().join(PUBLISH_PATH).unwrap(),
    };
    let status = client.wait_for_workflow(&handle, None).await.unwrap();
    assert_eq!(status.status, WorkflowState::Completed);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_client_errors_stop_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let handle = WorkflowHandle {
        kind: WorkflowKind::Publish,
        location: client.base_url().join(PUBLISH_PATH).unwrap(),
    };
    let err = client.wait_for_workflow(&handle, None).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_poll_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PUBLISH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("PUBLISH", "IN_PROGRESS", false)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let handle = WorkflowHandle {
        kind: WorkflowKind::Publish,
        location: client.base_url().join(PUBLISH_PATH).unwrap(),
    };
    let poll = PollConfig::new(Duration::from_millis(20), Duration::from_millis(150));
    let err = client.wait_for_workflow(&handle, Some(poll)).await.unwrap_err();

    assert!(err.is_timeout());
    match err {
        SdkError::PollTimeout {
            elapsed_ms,
            last_status,
        } => {
            assert!(elapsed_ms >= 150);
            assert_eq!(last_status, Some(WorkflowState::InProgress));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_direct_status_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DELETE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status("DELETE", "SCHEDULED", false)),
        )
        .mount(&server)
        .await;

    let status = client(&server)
        .get_delete_data_product_status("dp-1")
        .await
        .unwrap();
    assert_eq!(status.status, WorkflowState::Scheduled);
    assert!(!status.is_final_status);
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    let server = MockServer::start().await;
    let client = client(&server);
    let handle = WorkflowHandle {
        kind: WorkflowKind::Refresh,
        location: client.base_url().join("/status/x").unwrap(),
    };

    let poll = PollConfig::new(Duration::ZERO, Duration::from_secs(1));
    let err = client.wait_for_workflow(&handle, Some(poll)).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
