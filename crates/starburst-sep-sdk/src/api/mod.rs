// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! REST operations, one module per resource group.

mod biac;
mod data_products;
mod domains;
mod tags;
mod workflows;

pub(crate) const DATA_PRODUCT_PATH: &str = "api/v1/dataProduct/products";
pub(crate) const DOMAIN_PATH: &str = "api/v1/dataProduct/domains";
pub(crate) const TAG_PATH: &str = "api/v1/dataProduct/tags";
pub(crate) const BIAC_PATH: &str = "api/v1/biac";
