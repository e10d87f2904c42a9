// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Built-in access control: roles, grants, column masks, row filters and
//! the expressions masks and filters reference.
//!
//! List operations follow `nextPageToken` until the server stops returning one.

use reqwest::Method;
use tracing::{info, instrument};

use super::BIAC_PATH;
use crate::client::SepClient;
use crate::error::Result;
use crate::types::{
    ColumnMask, CreateExpressionRequest, CreateGrantRequest, Expression, ExpressionBindingRequest,
    Grant, ResourceId, Role, RoleRequest, RowFilter,
};

impl SepClient {
    // =========================================================================
    // Roles
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.get_all_pages(self.endpoint(BIAC_PATH, &["roles"])?).await
    }

    #[instrument(skip(self))]
    pub async fn get_role(&self, role_id: ResourceId) -> Result<Role> {
        let id = role_id.to_string();
        self.get_json(self.endpoint(BIAC_PATH, &["roles", &id])?).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_role(&self, request: &RoleRequest) -> Result<Role> {
        let url = self.endpoint(BIAC_PATH, &["roles"])?;
        let role: Role = self.send_json(Method::POST, url, request).await?;
        info!(role_id = role.id, "Created role");
        Ok(role)
    }

    #[instrument(skip(self, request))]
    pub async fn update_role(&self, role_id: ResourceId, request: &RoleRequest) -> Result<Role> {
        let id = role_id.to_string();
        let url = self.endpoint(BIAC_PATH, &["roles", &id])?;
        self.send_json(Method::PUT, url, request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, role_id: ResourceId) -> Result<()> {
        let id = role_id.to_string();
        self.delete(self.endpoint(BIAC_PATH, &["roles", &id])?).await?;
        info!("Deleted role");
        Ok(())
    }

    // =========================================================================
    // Grants
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_grants(&self, role_id: ResourceId) -> Result<Vec<Grant>> {
        let id = role_id.to_string();
        self.get_all_pages(self.endpoint(BIAC_PATH, &["roles", &id, "grants"])?).await
    }

    #[instrument(skip(self, request), fields(effect = %request.effect, action = %request.action))]
    pub async fn create_grant(
        &self,
        role_id: ResourceId,
        request: &CreateGrantRequest,
    ) -> Result<Grant> {
        let id = role_id.to_string();
        let url = self.endpoint(BIAC_PATH, &["roles", &id, "grants"])?;
        let grant: Grant = self.send_json(Method::POST, url, request).await?;
        info!(grant_id = grant.id, "Created grant");
        Ok(grant)
    }

    #[instrument(skip(self))]
    pub async fn delete_grant(&self, role_id: ResourceId, grant_id: ResourceId) -> Result<()> {
        let (role, grant) = (role_id.to_string(), grant_id.to_string());
        self.delete(self.endpoint(BIAC_PATH, &["roles", &role, "grants", &grant])?).await
    }

    // =========================================================================
    // Column masks
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_column_masks(&self, role_id: ResourceId) -> Result<Vec<ColumnMask>> {
        let id = role_id.to_string();
        self.get_all_pages(self.endpoint(BIAC_PATH, &["roles", &id, "columnMasks"])?).await
    }

    /// Mask a column for a role with an existing `COLUMN_MASK` expression.
    #[instrument(skip(self, request), fields(expression_id = request.expression_id))]
    pub async fn create_column_mask(
        &self,
        role_id: ResourceId,
        request: &ExpressionBindingRequest,
    ) -> Result<ColumnMask> {
        let id = role_id.to_string();
        let url = self.endpoint(BIAC_PATH, &["roles", &id, "columnMasks"])?;
        self.send_json(Method::POST, url, request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_column_mask(&self, role_id: ResourceId, mask_id: ResourceId) -> Result<()> {
        let (role, mask) = (role_id.to_string(), mask_id.to_string());
        self.delete(self.endpoint(BIAC_PATH, &["roles", &role, "columnMasks", &mask])?).await
    }

    // =========================================================================
    // Row filters
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_row_filters(&self, role_id: ResourceId) -> Result<Vec<RowFilter>> {
        let id = role_id.to_string();
        self.get_all_pages(self.endpoint(BIAC_PATH, &["roles", &id, "rowFilters"])?).await
    }

    /// Filter a table's rows for a role with an existing `ROW_FILTER` expression.
    #[instrument(skip(self, request), fields(expression_id = request.expression_id))]
    pub async fn create_row_filter(
        &self,
        role_id: ResourceId,
        request: &ExpressionBindingRequest,
    ) -> Result<RowFilter> {
        let id = role_id.to_string();
        let url = self.endpoint(BIAC_PATH, &["roles", &id, "rowFilters"])?;
        self.send_json(Method::POST, url, request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_row_filter(
        &self,
        role_id: ResourceId,
        filter_id: ResourceId,
    ) -> Result<()> {
        let (role, filter) = (role_id.to_string(), filter_id.to_string());
        self.delete(self.endpoint(BIAC_PATH, &["roles", &role, "rowFilters", &filter])?).await
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_expressions(&self) -> Result<Vec<Expression>> {
        self.get_all_pages(self.endpoint(BIAC_PATH, &["expressions"])?).await
    }

    #[instrument(
        skip(self, request),
        fields(name = %request.name, kind = %request.expression_type)
    )]
    pub async fn create_expression(&self, request: &CreateExpressionRequest) -> Result<Expression> {
        let url = self.endpoint(BIAC_PATH, &["expressions"])?;
        let expression: Expression = self.send_json(Method::POST, url, request).await?;
        info!(expression_id = expression.id, "Created expression");
        Ok(expression)
    }

    #[instrument(skip(self))]
    pub async fn delete_expression(&self, expression_id: ResourceId) -> Result<()> {
        let id = expression_id.to_string();
        self.delete(self.endpoint(BIAC_PATH, &["expressions", &id])?).await
    }
}
