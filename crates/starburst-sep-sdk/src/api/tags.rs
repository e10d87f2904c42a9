// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::TAG_PATH;
use crate::client::SepClient;
use crate::error::Result;
use crate::types::{Tag, TagUsage, TagValue};

impl SepClient {
    // =========================================================================
    // Tags
    // =========================================================================

    /// Replace the tags of a data product. Unknown tag values are created.
    #[instrument(skip(self, values), fields(count = values.len()))]
    pub async fn update_tags<S: AsRef<str>>(
        &self,
        product_id: &str,
        values: &[S],
    ) -> Result<Vec<Tag>> {
        let body: Vec<TagValue> = values.iter().map(|v| TagValue::new(v.as_ref())).collect();
        let url = self.endpoint(TAG_PATH, &["products", product_id])?;
        let tags: Option<Vec<Tag>> = self.send_json(Method::PUT, url, &body).await?;
        let tags = tags.unwrap_or_default();
        info!(product_id, count = tags.len(), "Updated tags");
        Ok(tags)
    }

    #[instrument(skip(self))]
    pub async fn get_tags(&self, product_id: &str) -> Result<Vec<Tag>> {
        let tags: Option<Vec<Tag>> = self
            .get_json(self.endpoint(TAG_PATH, &["products", product_id])?)
            .await?;
        Ok(tags.unwrap_or_default())
    }

    /// Detach a tag from a data product.
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, tag_id: &str, product_id: &str) -> Result<()> {
        self.delete(self.endpoint(TAG_PATH, &[tag_id, "products", product_id])?).await
    }

    /// Every tag known to the server.
    #[instrument(skip(self))]
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags: Option<Vec<Tag>> = self.get_json(self.endpoint(TAG_PATH, &[])?).await?;
        Ok(tags.unwrap_or_default())
    }

    /// Index which data products carry which tags.
    ///
    /// Products deleted while the scan runs are skipped. When the server
    /// cannot list all tags, `unused` stays empty.
    #[instrument(skip(self))]
    pub async fn tag_usage(&self) -> Result<TagUsage> {
        let mut usage = TagUsage::default();

        for product in self.search_data_products(None).await? {
            match self.get_tags(&product.id).await {
                Ok(tags) => {
                    for tag in tags {
                        usage.record(tag.value, product.id.clone());
                    }
                }
                Err(e) if e.is_not_found() => {
                    debug!(product_id = %product.id, "Data product vanished during tag scan");
                }
                Err(e) => return Err(e),
            }
        }

        match self.list_tags().await {
            Ok(all) => usage.mark_unused(all.iter().map(|t| t.value.as_str())),
            Err(e) if e.is_not_found() => {
                warn!("Server does not list tags, unused tags not reported");
            }
            Err(e) => return Err(e),
        }

        debug!(
            tags = usage.products_by_tag.len(),
            unused = usage.unused.len(),
            "Built tag usage"
        );
        Ok(usage)
    }
}
