// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tracing::{info, instrument};

use super::DATA_PRODUCT_PATH;
use crate::client::SepClient;
use crate::error::{Result, SdkError};
use crate::types::{PollConfig, WorkflowHandle, WorkflowKind, WorkflowStatus};

impl SepClient {
    // =========================================================================
    // Workflows
    // =========================================================================

    /// Start publishing a data product to Trino.
    ///
    /// `force` republishes even when the server considers the product unchanged.
    #[instrument(skip(self))]
    pub async fn publish_data_product(
        &self,
        product_id: &str,
        force: bool,
    ) -> Result<WorkflowHandle> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "workflows", "publish"])?;
        let location = self
            .trigger(url.clone(), &[("force", force)])
            .await?
            .unwrap_or(url);
        info!(location = %location, "Publish workflow started");
        Ok(WorkflowHandle {
            kind: WorkflowKind::Publish,
            location,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_publish_data_product_status(
        &self,
        product_id: &str,
    ) -> Result<WorkflowStatus> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "workflows", "publish"])?;
        self.get_workflow_status(&url).await
    }

    /// Start deleting a data product.
    ///
    /// With `skip_objects_delete` the views and schema stay in Trino and only
    /// the data product record is removed.
    #[instrument(skip(self))]
    pub async fn delete_data_product(
        &self,
        product_id: &str,
        skip_objects_delete: bool,
    ) -> Result<WorkflowHandle> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "workflows", "delete"])?;
        let location = self
            .trigger(url.clone(), &[("skipTrinoDelete", skip_objects_delete)])
            .await?
            .unwrap_or(url);
        info!(location = %location, "Delete workflow started");
        Ok(WorkflowHandle {
            kind: WorkflowKind::Delete,
            location,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_delete_data_product_status(&self, product_id: &str) -> Result<WorkflowStatus> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "workflows", "delete"])?;
        self.get_workflow_status(&url).await
    }

    /// Start refreshing a materialized view of a data product.
    #[instrument(skip(self))]
    pub async fn refresh_materialized_view(
        &self,
        product_id: &str,
        view_name: &str,
    ) -> Result<WorkflowHandle> {
        let url = self.endpoint(
            DATA_PRODUCT_PATH,
            &[product_id, "materializedViews", view_name, "refresh"],
        )?;
        let location = self
            .trigger(url.clone(), &[] as &[(&str, &str)])
            .await?
            .ok_or_else(|| SdkError::MissingLocation(format!("refresh of {}", url)))?;
        info!(location = %location, "Refresh workflow started");
        Ok(WorkflowHandle {
            kind: WorkflowKind::Refresh,
            location,
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Publish a data product and wait for the workflow to finish.
    pub async fn publish_data_product_and_wait(
        &self,
        product_id: &str,
        force: bool,
        poll: Option<PollConfig>,
    ) -> Result<WorkflowStatus> {
        let handle = self.publish_data_product(product_id, force).await?;
        self.wait_for_workflow(&handle, poll).await
    }

    /// Delete a data product and wait for the workflow to finish.
    pub async fn delete_data_product_and_wait(
        &self,
        product_id: &str,
        skip_objects_delete: bool,
        poll: Option<PollConfig>,
    ) -> Result<WorkflowStatus> {
        let handle = self
            .delete_data_product(product_id, skip_objects_delete)
            .await?;
        self.wait_for_workflow(&handle, poll).await
    }

    /// Refresh a materialized view and wait for the workflow to finish.
    pub async fn refresh_materialized_view_and_wait(
        &self,
        product_id: &str,
        view_name: &str,
        poll: Option<PollConfig>,
    ) -> Result<WorkflowStatus> {
        let handle = self
            .refresh_materialized_view(product_id, view_name)
            .await?;
        self.wait_for_workflow(&handle, poll).await
    }
}
