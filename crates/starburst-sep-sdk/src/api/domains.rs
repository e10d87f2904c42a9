// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use reqwest::Method;
use tracing::{debug, info, instrument};

use super::DOMAIN_PATH;
use crate::client::SepClient;
use crate::error::Result;
use crate::types::{CreateDomainRequest, Domain, UpdateDomainRequest};

impl SepClient {
    // =========================================================================
    // Domains
    // =========================================================================

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create_domain(&self, request: &CreateDomainRequest) -> Result<Domain> {
        let url = self.endpoint(DOMAIN_PATH, &[])?;
        let domain: Domain = self.send_json(Method::POST, url, request).await?;
        info!(domain_id = %domain.id, "Created domain");
        Ok(domain)
    }

    #[instrument(skip(self))]
    pub async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        debug!("Getting domain");
        self.get_json(self.endpoint(DOMAIN_PATH, &[domain_id])?).await
    }

    #[instrument(skip(self))]
    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        debug!("Listing domains");
        let domains: Option<Vec<Domain>> = self.get_json(self.endpoint(DOMAIN_PATH, &[])?).await?;
        Ok(domains.unwrap_or_default())
    }

    /// Update a domain's description and schema location.
    #[instrument(skip(self, request))]
    pub async fn update_domain(
        &self,
        domain_id: &str,
        request: &UpdateDomainRequest,
    ) -> Result<Domain> {
        let url = self.endpoint(DOMAIN_PATH, &[domain_id])?;
        self.send_json(Method::PUT, url, request).await
    }

    /// Delete a domain. The server refuses while data products are assigned to it.
    #[instrument(skip(self))]
    pub async fn delete_domain(&self, domain_id: &str) -> Result<()> {
        self.delete(self.endpoint(DOMAIN_PATH, &[domain_id])?).await?;
        info!("Deleted domain");
        Ok(())
    }
}
