// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Data products, their views and usage metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Data product owner contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub email: String,
}

impl Owner {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Link shown on the data product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantLink {
    pub label: String,
    pub url: String,
}

/// A column of a view or materialized view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A view published as part of a data product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub definition_query: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub marked_for_deletion: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub matches_trino_definition: Option<bool>,
}

/// Materialized view refresh settings. The server keeps these snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedViewProperties {
    #[serde(default)]
    pub refresh_interval: Option<String>,
    #[serde(default)]
    pub grace_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_column: Option<String>,
}

/// A materialized view published as part of a data product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedView {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub definition_query: String,
    #[serde(default)]
    pub definition_properties: MaterializedViewProperties,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub marked_for_deletion: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub matches_trino_definition: Option<bool>,
}

/// Who last queried the data product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessMetadata {
    #[serde(default)]
    pub last_queried_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_queried_by: Option<String>,
}

/// Per-caller flags attached to a data product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub is_bookmarked: bool,
}

/// Full data product as returned by get/create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    pub id: String,
    pub name: String,
    pub catalog_name: String,
    pub schema_name: String,
    pub data_domain_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Lifecycle status (DRAFT, PUBLISHED, PENDING_CHANGES, ...).
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default)]
    pub materialized_views: Vec<MaterializedView>,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub product_owners: Option<Vec<Owner>>,
    #[serde(default)]
    pub relevant_links: Vec<RelevantLink>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub access_metadata: Option<AccessMetadata>,
    #[serde(default)]
    pub ratings_count: i64,
    #[serde(default)]
    pub user_data: Option<UserData>,
    #[serde(default)]
    pub matches_trino_definition: Option<bool>,
    #[serde(default)]
    pub bookmark_count: i64,
}

impl DataProduct {
    /// Fully qualified schema, `catalog.schema`.
    pub fn qualified_schema(&self) -> String {
        format!("{}.{}", self.catalog_name, self.schema_name)
    }

    pub fn is_published(&self) -> bool {
        self.status.eq_ignore_ascii_case("PUBLISHED")
    }

    /// Every column of every view and materialized view.
    pub fn all_columns(&self) -> impl Iterator<Item = &Column> {
        self.views
            .iter()
            .flat_map(|v| v.columns.iter())
            .chain(self.materialized_views.iter().flat_map(|mv| mv.columns.iter()))
    }
}

/// Entry of a data product search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProductSearchResult {
    pub id: String,
    pub name: String,
    pub catalog_name: String,
    pub schema_name: String,
    pub data_domain_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub last_queried_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_queried_by: Option<String>,
    #[serde(default)]
    pub ratings_count: i64,
    #[serde(default)]
    pub user_data: Option<UserData>,
    #[serde(default)]
    pub bookmark_count: i64,
}

/// View definition sent on create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParameters {
    pub name: String,
    pub description: Option<String>,
    pub definition_query: String,
    pub columns: Vec<Column>,
    pub marked_for_deletion: bool,
}

impl ViewParameters {
    pub fn new(name: impl Into<String>, definition_query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            definition_query: definition_query.into(),
            columns: Vec::new(),
            marked_for_deletion: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

impl From<&View> for ViewParameters {
    fn from(view: &View) -> Self {
        Self {
            name: view.name.clone(),
            description: view.description.clone(),
            definition_query: view.definition_query.clone(),
            columns: view.columns.clone(),
            marked_for_deletion: view.marked_for_deletion,
        }
    }
}

/// Materialized view definition sent on create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedViewParameters {
    pub name: String,
    pub description: Option<String>,
    pub definition_query: String,
    pub definition_properties: MaterializedViewProperties,
    pub columns: Vec<Column>,
    pub marked_for_deletion: bool,
}

impl From<&MaterializedView> for MaterializedViewParameters {
    fn from(mv: &MaterializedView) -> Self {
        Self {
            name: mv.name.clone(),
            description: mv.description.clone(),
            definition_query: mv.definition_query.clone(),
            definition_properties: mv.definition_properties.clone(),
            columns: mv.columns.clone(),
            marked_for_deletion: mv.marked_for_deletion,
        }
    }
}

/// Body of data product create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProductParameters {
    pub name: String,
    pub catalog_name: String,
    pub schema_name: String,
    pub data_domain_id: String,
    pub summary: String,
    pub description: Option<String>,
    pub views: Vec<ViewParameters>,
    pub materialized_views: Vec<MaterializedViewParameters>,
    pub owners: Vec<Owner>,
    pub relevant_links: Vec<RelevantLink>,
}

impl DataProductParameters {
    pub fn new(
        name: impl Into<String>,
        catalog_name: impl Into<String>,
        schema_name: impl Into<String>,
        data_domain_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            catalog_name: catalog_name.into(),
            schema_name: schema_name.into(),
            data_domain_id: data_domain_id.into(),
            summary: summary.into(),
            description: None,
            views: Vec::new(),
            materialized_views: Vec::new(),
            owners: Vec::new(),
            relevant_links: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_view(mut self, view: ViewParameters) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_materialized_view(mut self, mv: MaterializedViewParameters) -> Self {
        self.materialized_views.push(mv);
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owners.push(owner);
        self
    }

    pub fn with_relevant_link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.relevant_links.push(RelevantLink {
            label: label.into(),
            url: url.into(),
        });
        self
    }
}

impl From<&DataProduct> for DataProductParameters {
    /// Parameters that would leave the product unchanged when sent back as an update.
    fn from(product: &DataProduct) -> Self {
        Self {
            name: product.name.clone(),
            catalog_name: product.catalog_name.clone(),
            schema_name: product.schema_name.clone(),
            data_domain_id: product.data_domain_id.clone(),
            summary: product.summary.clone(),
            description: product.description.clone(),
            views: product.views.iter().map(ViewParameters::from).collect(),
            materialized_views: product
                .materialized_views
                .iter()
                .map(MaterializedViewParameters::from)
                .collect(),
            owners: product.owners.clone(),
            relevant_links: product.relevant_links.clone(),
        }
    }
}

/// Body of a clone request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneDataProductRequest {
    pub catalog_name: String,
    pub new_schema_name: String,
    pub new_name: String,
    /// Target domain; the source product's domain when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_domain_id: Option<String>,
}

/// Usage statistics of a data product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProductStatistics {
    pub data_product_id: String,
    pub seven_day_query_count: i64,
    pub thirty_day_query_count: i64,
    pub seven_day_user_count: i64,
    pub thirty_day_user_count: i64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Saved example query shown with a data product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub query: String,
}

impl SampleQuery {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            query: query.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Outcome of the last materialized view import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedViewImport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub row_count: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Refresh metadata of a materialized view. All fields are empty until the
/// first refresh has happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedViewRefreshMetadata {
    #[serde(default)]
    pub last_import: Option<MaterializedViewImport>,
    #[serde(default)]
    pub incremental_column: Option<String>,
    #[serde(default)]
    pub refresh_interval: Option<String>,
    #[serde(default)]
    pub storage_schema: Option<String>,
    #[serde(default)]
    pub estimated_next_refresh_time: Option<DateTime<Utc>>,
}

impl MaterializedViewRefreshMetadata {
    pub fn has_refreshed(&self) -> bool {
        self.last_import.is_some()
    }
}
