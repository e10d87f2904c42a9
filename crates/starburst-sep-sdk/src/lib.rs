// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Starburst SEP SDK
//!
//! Client for the data product and built-in access control (BIAC) REST APIs
//! of Starburst Enterprise.
//!
//! # Architecture
//!
//! Every operation is an async method on [`SepClient`]:
//! - Data products (search, create, clone, update, statistics, sample queries)
//! - Domains and tags
//! - Workflows (publish, delete, materialized view refresh) with polling
//! - BIAC roles, grants, column masks, row filters and expressions
//! - PII classification and tagging helpers in [`pii`]
//!
//! Workflow triggers return a [`WorkflowHandle`]; waiting on it polls the
//! server until the workflow reports a final status or the [`PollConfig`]
//! deadline passes.
//!
//! # Example
//!
//! ```no_run
//! use starburst_sep_sdk::{DataProductParameters, SepClient, ViewParameters};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads SEP_HOST, AUTH_METHOD and credentials from the environment
//! let client = SepClient::from_env()?;
//!
//! let domain = client.list_domains().await?.remove(0);
//! let params = DataProductParameters::new("orders", "hive", "orders_dp", &domain.id, "Orders")
//!     .with_view(ViewParameters::new("recent", "SELECT * FROM hive.sales.orders"));
//! let product = client.create_data_product(&params).await?;
//!
//! // Publish and wait with the configured poll interval and timeout
//! let status = client
//!     .publish_data_product_and_wait(&product.id, false, None)
//!     .await?;
//! println!("Published: {}", status.status);
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod client;
mod config;
mod error;
pub mod pii;
mod types;
mod workflow;

pub use auth::{StaticToken, TokenProvider, basic_credentials};
pub use client::{SepClient, SepClientBuilder};
pub use config::{AuthConfig, AuthInfo, AuthMethod, KerberosConfig, Protocol, SepConfig};
pub use error::{ErrorCode, Result, SdkError};
pub use types::{
    AccessMetadata, AssignedDataProduct, CloneDataProductRequest, Column, ColumnMask,
    CreateDomainRequest, CreateExpressionRequest, CreateGrantRequest, DataProduct,
    DataProductParameters, DataProductSearchResult, DataProductStatistics, Domain,
    EntityCategory, EntitySpec, Expression, ExpressionBindingRequest, ExpressionType, Grant,
    GrantAction, GrantEffect, MaterializedView, MaterializedViewImport,
    MaterializedViewParameters, MaterializedViewProperties, MaterializedViewRefreshMetadata,
    Owner, Page, PollConfig, RelevantLink, ResourceId, Role, RoleRequest, RowFilter, SampleQuery,
    Tag, TagUsage, TagValue, UpdateDomainRequest, UserData, View, ViewParameters, WorkflowError,
    WorkflowHandle, WorkflowKind, WorkflowState, WorkflowStatus,
};
