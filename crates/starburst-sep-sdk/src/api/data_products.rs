// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::DATA_PRODUCT_PATH;
use crate::client::SepClient;
use crate::error::Result;
use crate::types::{
    CloneDataProductRequest, DataProduct, DataProductParameters, DataProductSearchResult,
    DataProductStatistics, MaterializedViewRefreshMetadata, SampleQuery,
};

impl SepClient {
    // =========================================================================
    // Data Products
    // =========================================================================

    /// Search data products.
    ///
    /// The server matches `search` case-insensitively against every data
    /// product attribute; only results whose name contains `search` are kept.
    #[instrument(skip(self))]
    pub async fn search_data_products(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<DataProductSearchResult>> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[])?;

        let results: Vec<DataProductSearchResult> = match search {
            Some(search) => {
                let options = json!({ "searchString": search }).to_string();
                self.get_json_with_query(url, &[("searchOptions", options)]).await?
            }
            None => self.get_json(url).await?,
        };

        let results: Vec<_> = results
            .into_iter()
            .filter(|r| search.is_none_or(|s| r.name.contains(s)))
            .collect();
        debug!(count = results.len(), "Searched data products");
        Ok(results)
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_data_product(&self, params: &DataProductParameters) -> Result<DataProduct> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[])?;
        let product: DataProduct = self.send_json(Method::POST, url, params).await?;
        info!(product_id = %product.id, "Created data product");
        Ok(product)
    }

    /// Clone a data product into a new schema, optionally in another domain.
    #[instrument(skip(self))]
    pub async fn clone_data_product(
        &self,
        product_id: &str,
        catalog_name: &str,
        new_schema_name: &str,
        new_name: &str,
        domain_id: Option<&str>,
    ) -> Result<DataProduct> {
        let request = CloneDataProductRequest {
            catalog_name: catalog_name.to_string(),
            new_schema_name: new_schema_name.to_string(),
            new_name: new_name.to_string(),
            data_domain_id: domain_id.map(str::to_string),
        };
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "clone"])?;
        let product: DataProduct = self.send_json(Method::POST, url, &request).await?;
        info!(clone_id = %product.id, "Cloned data product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_data_product(&self, product_id: &str) -> Result<DataProduct> {
        self.get_json(self.endpoint(DATA_PRODUCT_PATH, &[product_id])?).await
    }

    /// Replace a data product definition. Changes reach Trino only after a publish.
    #[instrument(skip(self, params))]
    pub async fn update_data_product(
        &self,
        product_id: &str,
        params: &DataProductParameters,
    ) -> Result<DataProduct> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id])?;
        self.send_json(Method::PUT, url, params).await
    }

    #[instrument(skip(self))]
    pub async fn get_data_product_statistics(
        &self,
        product_id: &str,
    ) -> Result<DataProductStatistics> {
        self.get_json(self.endpoint(DATA_PRODUCT_PATH, &[product_id, "statistics"])?).await
    }

    #[instrument(skip(self))]
    pub async fn list_sample_queries(&self, product_id: &str) -> Result<Vec<SampleQuery>> {
        let queries: Option<Vec<SampleQuery>> = self
            .get_json(self.endpoint(DATA_PRODUCT_PATH, &[product_id, "sampleQueries"])?)
            .await?;
        Ok(queries.unwrap_or_default())
    }

    /// Replace the sample queries of a data product.
    #[instrument(skip(self, queries), fields(count = queries.len()))]
    pub async fn update_sample_queries(
        &self,
        product_id: &str,
        queries: &[SampleQuery],
    ) -> Result<()> {
        let url = self.endpoint(DATA_PRODUCT_PATH, &[product_id, "sampleQueries"])?;
        self.send_json_no_content(Method::PUT, url, queries).await
    }

    /// Refresh metadata of a materialized view. Views that never refreshed
    /// come back as empty metadata.
    #[instrument(skip(self))]
    pub async fn get_materialized_view_refresh_metadata(
        &self,
        product_id: &str,
        view_name: &str,
    ) -> Result<MaterializedViewRefreshMetadata> {
        let url = self.endpoint(
            DATA_PRODUCT_PATH,
            &[product_id, "materializedViews", view_name, "refreshMetadata"],
        )?;
        let metadata: Option<MaterializedViewRefreshMetadata> = self.get_json(url).await?;
        Ok(metadata.unwrap_or_default())
    }
}
