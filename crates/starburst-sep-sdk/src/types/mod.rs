// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire types mirroring the SEP REST API.

mod biac;
mod data_product;
mod domain;
mod tag;
mod workflow;

pub use biac::{
    ColumnMask, CreateExpressionRequest, CreateGrantRequest, EntityCategory, EntitySpec,
    Expression, ExpressionBindingRequest, ExpressionType, Grant, GrantAction, GrantEffect, Page,
    ResourceId, Role, RoleRequest, RowFilter,
};
pub use data_product::{
    AccessMetadata, CloneDataProductRequest, Column, DataProduct, DataProductParameters,
    DataProductSearchResult, DataProductStatistics, MaterializedView, MaterializedViewImport,
    MaterializedViewParameters, MaterializedViewProperties, MaterializedViewRefreshMetadata, Owner,
    RelevantLink, SampleQuery, UserData, View, ViewParameters,
};
pub use domain::{AssignedDataProduct, CreateDomainRequest, Domain, UpdateDomainRequest};
pub use tag::{Tag, TagUsage, TagValue};
pub use workflow::{
    PollConfig, WorkflowError, WorkflowHandle, WorkflowKind, WorkflowState, WorkflowStatus,
};
