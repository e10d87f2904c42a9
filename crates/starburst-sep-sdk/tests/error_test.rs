// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error type tests for starburst-sep-sdk.

use starburst_sep_sdk::{ErrorCode, SdkError, WorkflowError, WorkflowState};

fn api_error(status: u16, code: ErrorCode) -> SdkError {
    SdkError::Api {
        status,
        code,
        message: "Data product not found".to_string(),
        body: r#"{"errorCode":"ENTITY_NOT_FOUND","message":"Data product not found"}"#.to_string(),
    }
}

#[test]
fn test_config_error_display() {
    let err = SdkError::Config("missing SEP_HOST".to_string());
    assert!(err.to_string().contains("configuration error"));
    assert!(err.to_string().contains("missing SEP_HOST"));
}

#[test]
fn test_connection_error_display() {
    let err = SdkError::Connection("connection refused".to_string());
    assert!(err.to_string().contains("connection error"));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_api_error_display() {
    let err = api_error(404, ErrorCode::EntityNotFound);
    let display = err.to_string();
    assert!(display.contains("404"));
    assert!(display.contains("ENTITY_NOT_FOUND"));
    assert!(display.contains("Data product not found"));
}

#[test]
fn test_api_error_accessors() {
    let err = api_error(404, ErrorCode::EntityNotFound);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.code(), Some(&ErrorCode::EntityNotFound));
    assert!(err.is_not_found());
    assert!(!err.is_timeout());

    let err = api_error(409, ErrorCode::AlreadyExists);
    assert!(!err.is_not_found());

    assert_eq!(SdkError::Config("x".to_string()).status(), None);
}

#[test]
fn test_workflow_error_lists_every_entity() {
    let err = SdkError::Workflow {
        workflow_type: "PUBLISH".to_string(),
        errors: vec![
            WorkflowError {
                entity_type: "VIEW".to_string(),
                entity_name: "orders_v".to_string(),
                message: "line 1:15: Table 'hive.sales.orderz' does not exist".to_string(),
            },
            WorkflowError {
                entity_type: "SCHEMA".to_string(),
                entity_name: "orders_dp".to_string(),
                message: "Access Denied".to_string(),
            },
        ],
    };

    let display = err.to_string();
    assert!(display.starts_with("PUBLISH workflow failed"));
    assert!(display.contains("VIEW orders_v: line 1:15"));
    assert!(display.contains("SCHEMA orders_dp: Access Denied"));
}

#[test]
fn test_workflow_error_without_details() {
    let err = SdkError::Workflow {
        workflow_type: "DELETE".to_string(),
        errors: vec![],
    };
    assert!(err.to_string().contains("no error details reported"));
}

#[test]
fn test_poll_timeout_is_distinct() {
    let err = SdkError::PollTimeout {
        elapsed_ms: 300_000,
        last_status: Some(WorkflowState::InProgress),
    };
    assert!(err.is_timeout());
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "workflow still IN_PROGRESS after 300000ms");
}

#[test]
fn test_missing_location_display() {
    let err = SdkError::MissingLocation("refresh of mv".to_string());
    assert!(err.to_string().contains("no Location header"));
}

#[test]
fn test_error_code_parse() {
    assert_eq!(ErrorCode::parse("INVALID_ARGUMENT"), ErrorCode::InvalidArgument);
    assert_eq!(ErrorCode::parse("PERMISSION_DENIED"), ErrorCode::PermissionDenied);
    assert_eq!(
        ErrorCode::parse("QUOTA_EXCEEDED"),
        ErrorCode::Other("QUOTA_EXCEEDED".to_string())
    );
}

#[test]
fn test_error_code_from_status() {
    assert_eq!(ErrorCode::from_status(400), ErrorCode::InvalidArgument);
    assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthenticated);
    assert_eq!(ErrorCode::from_status(403), ErrorCode::PermissionDenied);
    assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
    assert_eq!(ErrorCode::from_status(409), ErrorCode::AlreadyExists);
    assert_eq!(ErrorCode::from_status(501), ErrorCode::NotSupported);
    assert_eq!(ErrorCode::from_status(503), ErrorCode::InternalError);
    assert_eq!(ErrorCode::from_status(418).as_str(), "HTTP_418");
}

#[test]
fn test_error_from_serde_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err: SdkError = json_err.into();
    assert!(matches!(err, SdkError::Serialization(_)));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SdkError>();
}
