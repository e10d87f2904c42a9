// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Built-in access control (BIAC) resources.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a BIAC resource.
pub type ResourceId = i64;

/// One page of a BIAC list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Declares a wire enum with known SCREAMING_SNAKE_CASE values and a verbatim fallback.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value this client does not know; kept verbatim.
            Other(String),
        }

        impl $name {
            /// Known wire values, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(s) => s,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(s) => s,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Parses user input such as `select` or `allow-with-grant-option`.
        /// Unknown values are rejected; `Other` is only produced by deserialisation.
        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $name::from(s.trim().to_ascii_uppercase().replace('-', "_")) {
                    $name::Other(_) => Err(format!(
                        "unknown {} '{}', expected one of: {}",
                        stringify!($name),
                        s,
                        $name::VALUES
                            .iter()
                            .map(|v| v.to_ascii_lowercase().replace('_', "-"))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )),
                    known => Ok(known),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of object a grant, mask or filter applies to.
    EntityCategory {
        Tables => "TABLES",
        Functions => "FUNCTIONS",
        Procedures => "PROCEDURES",
        DataProducts => "DATA_PRODUCTS",
        Roles => "ROLES",
        Queries => "QUERIES",
        SystemSessionProperties => "SYSTEM_SESSION_PROPERTIES",
        CatalogSessionProperties => "CATALOG_SESSION_PROPERTIES",
        Ui => "UI",
    }
}

wire_enum! {
    /// Whether a grant allows or denies its action.
    GrantEffect {
        Allow => "ALLOW",
        AllowWithGrantOption => "ALLOW_WITH_GRANT_OPTION",
        Deny => "DENY",
    }
}

wire_enum! {
    /// Privilege a grant covers.
    GrantAction {
        Select => "SELECT",
        Insert => "INSERT",
        Update => "UPDATE",
        Delete => "DELETE",
        Create => "CREATE",
        Drop => "DROP",
        Alter => "ALTER",
        Show => "SHOW",
        Execute => "EXECUTE",
        Kill => "KILL",
        Impersonate => "IMPERSONATE",
        Set => "SET",
        All => "ALL",
    }
}

wire_enum! {
    /// What an expression is used for.
    ExpressionType {
        ColumnMask => "COLUMN_MASK",
        RowFilter => "ROW_FILTER",
    }
}

/// The object (or set of objects) a grant, mask or filter applies to.
///
/// Only the fields relevant to the category are sent; `*` wildcards are
/// accepted by the server for catalog, schema and table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySpec {
    pub category: EntityCategory,
    #[serde(default)]
    pub all_entities: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_product: Option<String>,
}

impl EntitySpec {
    /// Every entity of a category.
    pub fn all(category: EntityCategory) -> Self {
        Self {
            category,
            all_entities: true,
            catalog: None,
            schema: None,
            table: None,
            column: None,
            columns: None,
            domain: None,
            data_product: None,
        }
    }

    pub fn table(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog: Some(catalog.into()),
            schema: Some(schema.into()),
            table: Some(table.into()),
            all_entities: false,
            ..Self::all(EntityCategory::Tables)
        }
    }

    /// A single column; the target of column masks.
    pub fn column(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::table(catalog, schema, table)
        }
    }

    pub fn data_product(domain: impl Into<String>, data_product: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            data_product: Some(data_product.into()),
            all_entities: false,
            ..Self::all(EntityCategory::DataProducts)
        }
    }

    /// Restrict a table entity to some of its columns.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// A BIAC role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of role create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    pub description: Option<String>,
}

impl RoleRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A privilege granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: ResourceId,
    #[serde(default)]
    pub role_id: Option<ResourceId>,
    pub effect: GrantEffect,
    pub action: GrantAction,
    pub entity: EntitySpec,
}

/// Body of a grant create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrantRequest {
    pub effect: GrantEffect,
    pub action: GrantAction,
    pub entity: EntitySpec,
}

impl CreateGrantRequest {
    pub fn allow(action: GrantAction, entity: EntitySpec) -> Self {
        Self {
            effect: GrantEffect::Allow,
            action,
            entity,
        }
    }

    pub fn deny(action: GrantAction, entity: EntitySpec) -> Self {
        Self {
            effect: GrantEffect::Deny,
            action,
            entity,
        }
    }
}

/// A column mask attached to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMask {
    pub id: ResourceId,
    #[serde(default)]
    pub role_id: Option<ResourceId>,
    pub expression_id: ResourceId,
    pub entity: EntitySpec,
}

/// A row filter attached to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFilter {
    pub id: ResourceId,
    #[serde(default)]
    pub role_id: Option<ResourceId>,
    pub expression_id: ResourceId,
    pub entity: EntitySpec,
}

/// Body of column mask and row filter create requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionBindingRequest {
    pub expression_id: ResourceId,
    pub entity: EntitySpec,
}

/// A reusable SQL expression referenced by column masks and row filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub expression: String,
    #[serde(rename = "type")]
    pub expression_type: ExpressionType,
}

/// Body of an expression create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpressionRequest {
    pub name: String,
    pub description: Option<String>,
    pub expression: String,
    #[serde(rename = "type")]
    pub expression_type: ExpressionType,
}

impl CreateExpressionRequest {
    pub fn column_mask(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            expression: expression.into(),
            expression_type: ExpressionType::ColumnMask,
        }
    }

    pub fn row_filter(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            expression_type: ExpressionType::RowFilter,
            ..Self::column_mask(name, expression)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
