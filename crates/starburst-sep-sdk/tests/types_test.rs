// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Serialization tests for starburst-sep-sdk request and response types.

use serde_json::json;
use starburst_sep_sdk::{
    CloneDataProductRequest, Column, CreateDomainRequest, CreateExpressionRequest,
    CreateGrantRequest, DataProduct, DataProductParameters, EntityCategory, EntitySpec,
    GrantAction, GrantEffect, MaterializedViewParameters, MaterializedViewProperties,
    MaterializedViewRefreshMetadata, Owner, Page, Role, SampleQuery, ViewParameters,
    WorkflowState, WorkflowStatus,
};

#[test]
fn test_data_product_parameters_schema() {
    let params = DataProductParameters::new("orders", "hive", "orders_dp", "dom-1", "Order facts")
        .with_description("All orders")
        .with_view(
            ViewParameters::new("recent_orders", "SELECT * FROM hive.sales.orders")
                .with_columns(vec![
                    Column::new("order_id", "bigint").with_description("Order key"),
                ]),
        )
        .with_owner(Owner::new("Ana", "ana@example.com"))
        .with_relevant_link("Wiki", "https://wiki.example.com/orders");

    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "orders",
            "catalogName": "hive",
            "schemaName": "orders_dp",
            "dataDomainId": "dom-1",
            "summary": "Order facts",
            "description": "All orders",
            "views": [{
                "name": "recent_orders",
                "description": null,
                "definitionQuery": "SELECT * FROM hive.sales.orders",
                "columns": [{"name": "order_id", "type": "bigint", "description": "Order key"}],
                "markedForDeletion": false
            }],
            "materializedViews": [],
            "owners": [{"name": "Ana", "email": "ana@example.com"}],
            "relevantLinks": [{"label": "Wiki", "url": "https://wiki.example.com/orders"}]
        })
    );
}

#[test]
fn test_materialized_view_properties_stay_snake_case() {
    let mv = MaterializedViewParameters {
        name: "daily".to_string(),
        description: None,
        definition_query: "SELECT 1".to_string(),
        definition_properties: MaterializedViewProperties {
            refresh_interval: Some("1h".to_string()),
            grace_period: Some("10m".to_string()),
            incremental_column: None,
        },
        columns: vec![],
        marked_for_deletion: false,
    };

    let value = serde_json::to_value(&mv).unwrap();
    assert_eq!(
        value["definitionProperties"],
        json!({"refresh_interval": "1h", "grace_period": "10m"})
    );
}

#[test]
fn test_clone_request_omits_missing_domain() {
    let request = CloneDataProductRequest {
        catalog_name: "hive".to_string(),
        new_schema_name: "orders_copy".to_string(),
        new_name: "orders copy".to_string(),
        data_domain_id: None,
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"catalogName": "hive", "newSchemaName": "orders_copy", "newName": "orders copy"})
    );
}

#[test]
fn test_create_domain_sends_nulls() {
    let request = CreateDomainRequest::new("sales");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"name": "sales", "description": null, "schemaLocation": null})
    );
}

#[test]
fn test_data_product_minimal_response() {
    let product: DataProduct = serde_json::from_value(json!({
        "id": "dp-1",
        "name": "orders",
        "catalogName": "hive",
        "schemaName": "orders_dp",
        "dataDomainId": "dom-1",
        "status": "PUBLISHED",
        "views": [{
            "name": "v",
            "definitionQuery": "SELECT 1",
            "columns": [{"name": "email", "type": "varchar"}]
        }],
        "createdAt": "2024-05-01T10:00:00Z",
        "someFutureField": true
    }))
    .unwrap();

    assert!(product.is_published());
    assert_eq!(product.qualified_schema(), "hive.orders_dp");
    assert_eq!(product.all_columns().count(), 1);
    assert!(product.created_at.is_some());
    assert!(product.materialized_views.is_empty());
}

#[test]
fn test_parameters_from_product_keep_definition() {
    let product: DataProduct = serde_json::from_value(json!({
        "id": "dp-1",
        "name": "orders",
        "catalogName": "hive",
        "schemaName": "orders_dp",
        "dataDomainId": "dom-1",
        "summary": "s",
        "views": [{"name": "v", "definitionQuery": "SELECT 1", "markedForDeletion": true}]
    }))
    .unwrap();

    let params = DataProductParameters::from(&product);
    assert_eq!(params.name, "orders");
    assert_eq!(params.views.len(), 1);
    assert!(params.views[0].marked_for_deletion);
}

#[test]
fn test_workflow_status_parsing() {
    let status: WorkflowStatus = serde_json::from_value(json!({
        "workflowType": "PUBLISH",
        "status": "ERROR",
        "isFinalStatus": true,
        "errors": [{"entityType": "VIEW", "entityName": "v1", "message": "bad SQL"}]
    }))
    .unwrap();

    assert!(status.is_error());
    assert!(status.is_final_status);
    assert_eq!(status.errors[0].entity_name, "v1");
}

#[test]
fn test_workflow_state_preserves_unknown_values() {
    let status: WorkflowStatus =
        serde_json::from_value(json!({"status": "CANCELLING", "isFinalStatus": false})).unwrap();
    assert_eq!(status.status, WorkflowState::Other("CANCELLING".to_string()));
    assert_eq!(
        serde_json::to_value(&status.status).unwrap(),
        json!("CANCELLING")
    );
}

#[test]
fn test_refresh_metadata_null_fields() {
    let metadata: MaterializedViewRefreshMetadata =
        serde_json::from_value(json!({"lastImport": null})).unwrap();
    assert!(!metadata.has_refreshed());
    assert_eq!(metadata, MaterializedViewRefreshMetadata::default());
}

#[test]
fn test_sample_query_schema() {
    let query = SampleQuery::new("top", "SELECT * FROM t LIMIT 10");
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({"name": "top", "description": null, "query": "SELECT * FROM t LIMIT 10"})
    );
}

#[test]
fn test_grant_request_schema() {
    let request = CreateGrantRequest::allow(
        GrantAction::Select,
        EntitySpec::table("hive", "sales", "*"),
    );
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "effect": "ALLOW",
            "action": "SELECT",
            "entity": {
                "category": "TABLES",
                "allEntities": false,
                "catalog": "hive",
                "schema": "sales",
                "table": "*"
            }
        })
    );
}

#[test]
fn test_entity_column_and_data_product() {
    let entity = EntitySpec::column("hive", "crm", "customers", "ssn");
    assert_eq!(entity.category, EntityCategory::Tables);
    assert_eq!(entity.column.as_deref(), Some("ssn"));

    let entity = EntitySpec::data_product("sales", "orders");
    assert_eq!(
        serde_json::to_value(&entity).unwrap(),
        json!({
            "category": "DATA_PRODUCTS",
            "allEntities": false,
            "domain": "sales",
            "dataProduct": "orders"
        })
    );
}

#[test]
fn test_wire_enums_parse_cli_spelling() {
    assert_eq!(
        "allow-with-grant-option".parse::<GrantEffect>().unwrap(),
        GrantEffect::AllowWithGrantOption
    );
    assert_eq!("select".parse::<GrantAction>().unwrap(), GrantAction::Select);

    let err = "selcet".parse::<GrantAction>().unwrap_err();
    assert!(err.contains("unknown GrantAction 'selcet'"));
    assert!(err.contains("select, insert"));
}

#[test]
fn test_unknown_wire_values_survive_deserialisation() {
    let action: GrantAction = serde_json::from_value(json!("MERGE")).unwrap();
    assert_eq!(action, GrantAction::Other("MERGE".to_string()));
    assert_eq!(serde_json::to_value(&action).unwrap(), json!("MERGE"));
}

#[test]
fn test_expression_request_schema() {
    let request = CreateExpressionRequest::row_filter("eu_only", "region = 'EU'")
        .with_description("EU rows");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "name": "eu_only",
            "description": "EU rows",
            "expression": "region = 'EU'",
            "type": "ROW_FILTER"
        })
    );
}

#[test]
fn test_page_defaults() {
    let page: Page<Role> = serde_json::from_value(json!({})).unwrap();
    assert!(page.result.is_empty());
    assert!(page.next_page_token.is_none());

    let page: Page<Role> = serde_json::from_value(json!({
        "result": [{"id": 3, "name": "analyst"}],
        "nextPageToken": "abc"
    }))
    .unwrap();
    assert_eq!(page.result[0].name, "analyst");
    assert_eq!(page.next_page_token.as_deref(), Some("abc"));
}
