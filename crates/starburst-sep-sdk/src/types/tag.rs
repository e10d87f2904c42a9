// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Data product tags.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A tag attached to one or more data products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub value: String,
}

/// Element of a tag update body: `[{"value": "..."}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub value: String,
}

impl TagValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Which data products use which tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    /// Tag value to the ids of the data products carrying it.
    pub products_by_tag: BTreeMap<String, BTreeSet<String>>,
    /// Tags known to the server that no data product carries.
    pub unused: BTreeSet<String>,
}

impl TagUsage {
    /// Record that `product_id` carries `tag`.
    pub fn record(&mut self, tag: impl Into<String>, product_id: impl Into<String>) {
        self.products_by_tag
            .entry(tag.into())
            .or_default()
            .insert(product_id.into());
    }

    /// Number of products carrying `tag`.
    pub fn usage_count(&self, tag: &str) -> usize {
        self.products_by_tag.get(tag).map_or(0, BTreeSet::len)
    }

    /// Tags carried by exactly one product.
    pub fn single_use(&self) -> Vec<&str> {
        self.products_by_tag
            .iter()
            .filter(|(_, products)| products.len() == 1)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    /// Mark every tag in `known` that no product carries as unused.
    pub fn mark_unused<'a>(&mut self, known: impl IntoIterator<Item = &'a str>) {
        for tag in known {
            if !self.products_by_tag.contains_key(tag) {
                self.unused.insert(tag.to_string());
            }
        }
    }
}
