// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Keyword-based PII classification of data product columns.
//!
//! Columns are matched by substring against the lower-cased column name and
//! description. Categories are tried in the order High, Medium, Low,
//! Financial and the first hit wins, so `ssn_email` is High.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::SepClient;
use crate::error::Result;
use crate::types::{Column, DataProduct, DataProductParameters, Tag};

/// Tags added to any product with at least one PII column.
pub const GENERAL_PII_TAGS: [&str; 3] = ["contains-pii", "data-privacy", "requires-governance"];

/// Sensitivity class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    High,
    Medium,
    Low,
    Financial,
    NonPii,
}

impl PiiCategory {
    /// Categories in matching order.
    pub const SENSITIVE: [PiiCategory; 4] = [
        PiiCategory::High,
        PiiCategory::Medium,
        PiiCategory::Low,
        PiiCategory::Financial,
    ];

    pub const ALL: [PiiCategory; 5] = [
        PiiCategory::High,
        PiiCategory::Medium,
        PiiCategory::Low,
        PiiCategory::Financial,
        PiiCategory::NonPii,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            PiiCategory::High => &[
                "ssn",
                "social_security",
                "credit_card",
                "passport",
                "driver_license",
                "tax_id",
            ],
            PiiCategory::Medium => &["email", "phone", "address", "birth_date", "birthdate", "dob"],
            PiiCategory::Low => &["name", "first_name", "last_name", "username", "user_id"],
            PiiCategory::Financial => &[
                "salary",
                "income",
                "account_number",
                "routing_number",
                "iban",
            ],
            PiiCategory::NonPii => &[],
        }
    }

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            PiiCategory::High => &[
                "pii-high",
                "sensitive-data",
                "restricted-access",
                "compliance-required",
            ],
            PiiCategory::Medium => &["pii-medium", "personal-data", "gdpr-applicable"],
            PiiCategory::Low => &["pii-low", "personal-identifier"],
            PiiCategory::Financial => &["pii-financial", "financial-data", "restricted-access"],
            PiiCategory::NonPii => &[],
        }
    }

    /// Human readable label used in reports.
    pub fn description_suffix(&self) -> &'static str {
        match self {
            PiiCategory::High => "[PII-HIGH: Highly sensitive personal information]",
            PiiCategory::Medium => "[PII-MEDIUM: Personal contact information]",
            PiiCategory::Low => "[PII-LOW: Personal identifier]",
            PiiCategory::Financial => "[PII-FINANCIAL: Financial information]",
            PiiCategory::NonPii => "[NON-PII]",
        }
    }

    /// Marker appended to column descriptions.
    pub fn marker(&self) -> &'static str {
        match self {
            PiiCategory::High => "<pii_high>",
            PiiCategory::Medium => "<pii_medium>",
            PiiCategory::Low => "<pii_low>",
            PiiCategory::Financial => "<pii_financial>",
            PiiCategory::NonPii => "<non_pii>",
        }
    }

    pub fn is_pii(&self) -> bool {
        *self != PiiCategory::NonPii
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PiiCategory::High => "HIGH_SENSITIVITY",
            PiiCategory::Medium => "MEDIUM_SENSITIVITY",
            PiiCategory::Low => "LOW_SENSITIVITY",
            PiiCategory::Financial => "FINANCIAL",
            PiiCategory::NonPii => "NON_PII",
        };
        f.write_str(name)
    }
}

pub fn classify_column(column: &Column) -> PiiCategory {
    let name = column.name.to_lowercase();
    let description = column.description.as_deref().unwrap_or("").to_lowercase();

    PiiCategory::SENSITIVE
        .into_iter()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|k| name.contains(k) || description.contains(k))
        })
        .unwrap_or(PiiCategory::NonPii)
}

/// Columns grouped by category, in input order within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PiiClassification {
    pub high: Vec<Column>,
    pub medium: Vec<Column>,
    pub low: Vec<Column>,
    pub financial: Vec<Column>,
    pub non_pii: Vec<Column>,
}

impl PiiClassification {
    pub fn get(&self, category: PiiCategory) -> &[Column] {
        match category {
            PiiCategory::High => &self.high,
            PiiCategory::Medium => &self.medium,
            PiiCategory::Low => &self.low,
            PiiCategory::Financial => &self.financial,
            PiiCategory::NonPii => &self.non_pii,
        }
    }

    fn get_mut(&mut self, category: PiiCategory) -> &mut Vec<Column> {
        match category {
            PiiCategory::High => &mut self.high,
            PiiCategory::Medium => &mut self.medium,
            PiiCategory::Low => &mut self.low,
            PiiCategory::Financial => &mut self.financial,
            PiiCategory::NonPii => &mut self.non_pii,
        }
    }

    pub fn has_pii(&self) -> bool {
        PiiCategory::SENSITIVE
            .iter()
            .any(|c| !self.get(*c).is_empty())
    }

    /// Category a column was placed in, matched by name.
    pub fn category_of(&self, column_name: &str) -> PiiCategory {
        PiiCategory::ALL
            .into_iter()
            .find(|c| self.get(*c).iter().any(|col| col.name == column_name))
            .unwrap_or(PiiCategory::NonPii)
    }

    pub fn report(&self) -> PiiReport {
        let categories = PiiCategory::ALL
            .into_iter()
            .map(|category| {
                let columns = self.get(category);
                CategoryReport {
                    category,
                    label: category.description_suffix(),
                    count: columns.len(),
                    columns: columns.iter().map(|c| c.name.clone()).collect(),
                }
            })
            .collect::<Vec<_>>();

        PiiReport {
            total_columns: categories.iter().map(|c| c.count).sum(),
            pii_columns: categories
                .iter()
                .filter(|c| c.category.is_pii())
                .map(|c| c.count)
                .sum(),
            categories,
        }
    }
}

pub fn classify_columns<'a>(columns: impl IntoIterator<Item = &'a Column>) -> PiiClassification {
    let mut classification = PiiClassification::default();
    for column in columns {
        classification
            .get_mut(classify_column(column))
            .push(column.clone());
    }
    classification
}

/// Tags implied by a classification, sorted and without duplicates.
pub fn suggested_tags(classification: &PiiClassification) -> Vec<String> {
    let mut tags: BTreeSet<&str> = PiiCategory::SENSITIVE
        .iter()
        .filter(|c| !classification.get(**c).is_empty())
        .flat_map(|c| c.tags().iter().copied())
        .collect();

    if classification.has_pii() {
        tags.extend(GENERAL_PII_TAGS);
    }
    tags.into_iter().map(str::to_string).collect()
}

/// Tag recording the day a product was reviewed, e.g. `pii-reviewed-20250130`.
pub fn review_tag(date: NaiveDate) -> String {
    format!("pii-reviewed-{}", date.format("%Y%m%d"))
}

/// Append the category marker to a description, replacing any marker already present.
pub fn annotate_description(description: Option<&str>, category: PiiCategory) -> String {
    let description = description.unwrap_or("No description");

    match PiiCategory::ALL
        .iter()
        .map(PiiCategory::marker)
        .find(|m| description.contains(m))
    {
        Some(existing) => description.replace(existing, category.marker()),
        None => format!("{} {}", description, category.marker()),
    }
}

fn annotate_column(column: &Column) -> Column {
    Column {
        description: Some(annotate_description(
            column.description.as_deref(),
            classify_column(column),
        )),
        ..column.clone()
    }
}

/// Update parameters for `product` with every column description annotated.
pub fn annotate_data_product(product: &DataProduct) -> DataProductParameters {
    let mut params = DataProductParameters::from(product);
    for view in &mut params.views {
        view.columns = view.columns.iter().map(annotate_column).collect();
    }
    for view in &mut params.materialized_views {
        view.columns = view.columns.iter().map(annotate_column).collect();
    }
    params
}

/// Per-category summary of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiiReport {
    pub total_columns: usize,
    pub pii_columns: usize,
    pub categories: Vec<CategoryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: PiiCategory,
    pub label: &'static str,
    pub count: usize,
    pub columns: Vec<String>,
}

impl SepClient {
    /// Classify every column of a data product and merge the implied tags
    /// into its existing tags.
    ///
    /// Products without PII columns are left untouched and their current
    /// tags are returned.
    #[instrument(skip(self))]
    pub async fn apply_pii_tags(&self, product_id: &str) -> Result<Vec<Tag>> {
        let product = self.get_data_product(product_id).await?;
        let classification = classify_columns(product.all_columns());
        let current = self.get_tags(product_id).await?;

        if !classification.has_pii() {
            info!("No PII columns found");
            return Ok(current);
        }

        let mut values: BTreeSet<String> = current.into_iter().map(|t| t.value).collect();
        values.extend(suggested_tags(&classification));
        values.insert(review_tag(Utc::now().date_naive()));

        let values: Vec<String> = values.into_iter().collect();
        info!(
            pii_columns = classification.report().pii_columns,
            tags = values.len(),
            "Applying PII tags"
        );
        self.update_tags(product_id, &values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Column {
        Column::new(name, "varchar")
    }

    #[test]
    fn test_classify_by_name() {
        assert_eq!(classify_column(&col("customer_ssn")), PiiCategory::High);
        assert_eq!(classify_column(&col("Email_Address")), PiiCategory::Medium);
        assert_eq!(classify_column(&col("last_name")), PiiCategory::Low);
        assert_eq!(classify_column(&col("annual_salary")), PiiCategory::Financial);
        assert_eq!(classify_column(&col("order_total")), PiiCategory::NonPii);
    }

    #[test]
    fn test_classify_by_description() {
        let column = col("c1").with_description("Customer PHONE number");
        assert_eq!(classify_column(&column), PiiCategory::Medium);
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "email" (Medium) is checked before "name" (Low)
        assert_eq!(classify_column(&col("email_username")), PiiCategory::Medium);
        // High before Financial
        assert_eq!(classify_column(&col("tax_id_income")), PiiCategory::High);
    }

    #[test]
    fn test_classify_columns_groups() {
        let columns = vec![col("ssn"), col("phone"), col("id"), col("iban"), col("dob")];
        let classification = classify_columns(&columns);

        assert_eq!(classification.high.len(), 1);
        assert_eq!(classification.medium.len(), 2);
        assert_eq!(classification.financial.len(), 1);
        assert_eq!(classification.non_pii.len(), 1);
        assert!(classification.has_pii());
        assert_eq!(classification.category_of("iban"), PiiCategory::Financial);
    }

    #[test]
    fn test_suggested_tags_sorted_and_deduplicated() {
        let classification = classify_columns(&[col("ssn"), col("salary")]);
        let tags = suggested_tags(&classification);

        assert_eq!(
            tags,
            vec![
                "compliance-required",
                "contains-pii",
                "data-privacy",
                "financial-data",
                "pii-financial",
                "pii-high",
                "requires-governance",
                "restricted-access",
                "sensitive-data",
            ]
        );
    }

    #[test]
    fn test_no_tags_without_pii() {
        let classification = classify_columns(&[col("order_id"), col("amount")]);
        assert!(!classification.has_pii());
        assert!(suggested_tags(&classification).is_empty());
    }

    #[test]
    fn test_annotate_description() {
        assert_eq!(
            annotate_description(Some("Customer email"), PiiCategory::Medium),
            "Customer email <pii_medium>"
        );
        assert_eq!(
            annotate_description(None, PiiCategory::NonPii),
            "No description <non_pii>"
        );
        // Re-annotation replaces the old marker instead of stacking.
        assert_eq!(
            annotate_description(Some("Customer email <pii_low>"), PiiCategory::Medium),
            "Customer email <pii_medium>"
        );
    }

    #[test]
    fn test_review_tag() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        assert_eq!(review_tag(date), "pii-reviewed-20250130");
    }

    #[test]
    fn test_report_counts() {
        let report = classify_columns(&[col("ssn"), col("first_name"), col("qty")]).report();
        assert_eq!(report.total_columns, 3);
        assert_eq!(report.pii_columns, 2);

        let low = report
            .categories
            .iter()
            .find(|c| c.category == PiiCategory::Low)
            .unwrap();
        assert_eq!(low.columns, vec!["first_name"]);
    }
}
