// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! SEP Control CLI
//!
//! CLI tool for managing Starburst Enterprise data products, domains, tags
//! and built-in access control.
//!
//! Connection settings come from the environment (or a `.env` file), see
//! `SepConfig::from_env`. All results are printed as JSON on stdout; logs
//! go to stderr and are controlled by `RUST_LOG` (default: warn).
//!
//! ```text
//! sep-ctl products search orders
//! sep-ctl workflow publish <product_id> --wait
//! sep-ctl pii scan <product_id>
//! sep-ctl biac grants create 7 --action select --catalog hive --schema sales --table orders
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;

use starburst_sep_sdk::pii;
use starburst_sep_sdk::{
    AuthMethod, CreateDomainRequest, CreateExpressionRequest, CreateGrantRequest,
    DataProductParameters, EntityCategory, EntitySpec, ExpressionBindingRequest, GrantAction,
    GrantEffect, PollConfig, ResourceId, RoleRequest, SampleQuery, SepClient, SepConfig,
    StaticToken, UpdateDomainRequest, WorkflowHandle, WorkflowStatus,
};

#[derive(Debug, Parser)]
#[command(
    name = "sep-ctl",
    version,
    about = "Manage Starburst Enterprise data products and access control"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Load settings from this file instead of ./.env
    #[arg(long, global = true, env = "SEP_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// SPNEGO token for kerberos authentication
    #[arg(long, global = true, env = "SEP_NEGOTIATE_TOKEN", hide_env_values = true)]
    negotiate_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the connection settings with secrets masked
    AuthInfo,
    /// Manage data product domains
    #[command(subcommand)]
    Domains(DomainCommand),
    /// Manage data products
    #[command(subcommand)]
    Products(ProductCommand),
    /// Manage data product tags
    #[command(subcommand)]
    Tags(TagCommand),
    /// Publish, delete and refresh workflows
    #[command(subcommand)]
    Workflow(WorkflowCommand),
    /// Classify columns and apply PII tags
    #[command(subcommand)]
    Pii(PiiCommand),
    /// Built-in access control
    #[command(subcommand)]
    Biac(BiacCommand),
}

#[derive(Debug, Subcommand)]
enum DomainCommand {
    List,
    Get {
        domain_id: String,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        schema_location: Option<String>,
    },
    Update {
        domain_id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        schema_location: Option<String>,
    },
    Delete {
        domain_id: String,
    },
}

#[derive(Debug, Subcommand)]
enum ProductCommand {
    /// Search by name (all products without a search string)
    Search {
        search: Option<String>,
    },
    Get {
        product_id: String,
    },
    /// Create from a JSON file of data product parameters
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a product definition from a JSON file
    Update {
        product_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Clone {
        product_id: String,
        #[arg(long)]
        catalog: String,
        #[arg(long)]
        schema: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        domain: Option<String>,
    },
    Stats {
        product_id: String,
    },
    SampleQueries {
        product_id: String,
    },
    /// Replace sample queries from a JSON array file
    SetSampleQueries {
        product_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    RefreshMetadata {
        product_id: String,
        view: String,
    },
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Every tag known to the server
    List,
    Get {
        product_id: String,
    },
    /// Replace the tags of a product
    Set {
        product_id: String,
        #[arg(required = true)]
        values: Vec<String>,
    },
    Delete {
        tag_id: String,
        product_id: String,
    },
    /// Which products use which tags, and which tags are unused
    Usage,
}

#[derive(Debug, Args)]
struct WaitArgs {
    /// Poll until the workflow finishes
    #[arg(long)]
    wait: bool,
    /// Delay between status checks in milliseconds
    #[arg(long, requires = "wait")]
    interval_ms: Option<u64>,
    /// Give up after this many milliseconds
    #[arg(long, requires = "wait")]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusKind {
    Publish,
    Delete,
}

#[derive(Debug, Subcommand)]
enum WorkflowCommand {
    Publish {
        product_id: String,
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    Delete {
        product_id: String,
        /// Keep the views and schema in Trino
        #[arg(long)]
        skip_objects_delete: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    Refresh {
        product_id: String,
        view: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Current status of a publish or delete workflow
    Status {
        product_id: String,
        #[arg(long, value_enum, default_value = "publish")]
        kind: StatusKind,
    },
}

#[derive(Debug, Subcommand)]
enum PiiCommand {
    /// Report column classification and suggested tags
    Scan { product_id: String },
    /// Merge suggested PII tags into the product's tags
    Apply { product_id: String },
    /// Mark every column description with its PII category
    Annotate {
        product_id: String,
        /// Print the updated definition without saving it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Subcommand)]
enum BiacCommand {
    #[command(subcommand)]
    Roles(RoleCommand),
    #[command(subcommand)]
    Grants(GrantCommand),
    #[command(subcommand)]
    Masks(MaskCommand),
    #[command(subcommand)]
    Filters(FilterCommand),
    #[command(subcommand)]
    Expressions(ExpressionCommand),
}

#[derive(Debug, Subcommand)]
enum RoleCommand {
    List,
    Get {
        role_id: ResourceId,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        role_id: ResourceId,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        role_id: ResourceId,
    },
}

/// Parses a BIAC wire value given as `select` or `data-products`, rejecting unknown values.
fn parse_wire<T: FromStr<Err = String>>(value: &str) -> Result<T, String> {
    value.parse()
}

/// Selects the object a grant, mask or filter applies to.
#[derive(Debug, Args)]
struct EntityArgs {
    #[arg(long, default_value = "tables", value_parser = parse_wire::<EntityCategory>)]
    category: EntityCategory,
    #[arg(long)]
    catalog: Option<String>,
    #[arg(long)]
    schema: Option<String>,
    #[arg(long)]
    table: Option<String>,
    #[arg(long)]
    column: Option<String>,
}

impl EntityArgs {
    fn to_entity(&self) -> EntitySpec {
        let all_entities = self.catalog.is_none() && self.schema.is_none() && self.table.is_none();
        EntitySpec {
            category: self.category.clone(),
            all_entities,
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
            table: self.table.clone(),
            column: self.column.clone(),
            ..EntitySpec::all(self.category.clone())
        }
    }
}

#[derive(Debug, Subcommand)]
enum GrantCommand {
    List {
        role_id: ResourceId,
    },
    Create {
        role_id: ResourceId,
        #[arg(long, default_value = "allow", value_parser = parse_wire::<GrantEffect>)]
        effect: GrantEffect,
        #[arg(long, value_parser = parse_wire::<GrantAction>)]
        action: GrantAction,
        #[command(flatten)]
        entity: EntityArgs,
    },
    Delete {
        role_id: ResourceId,
        grant_id: ResourceId,
    },
}

#[derive(Debug, Subcommand)]
enum MaskCommand {
    List {
        role_id: ResourceId,
    },
    Create {
        role_id: ResourceId,
        #[arg(long)]
        expression_id: ResourceId,
        #[command(flatten)]
        entity: EntityArgs,
    },
    Delete {
        role_id: ResourceId,
        mask_id: ResourceId,
    },
}

#[derive(Debug, Subcommand)]
enum FilterCommand {
    List {
        role_id: ResourceId,
    },
    Create {
        role_id: ResourceId,
        #[arg(long)]
        expression_id: ResourceId,
        #[command(flatten)]
        entity: EntityArgs,
    },
    Delete {
        role_id: ResourceId,
        filter_id: ResourceId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExpressionKind {
    Mask,
    Filter,
}

#[derive(Debug, Subcommand)]
enum ExpressionCommand {
    List,
    Create {
        name: String,
        /// SQL expression
        expression: String,
        #[arg(long, value_enum)]
        kind: ExpressionKind,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        expression_id: ResourceId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match execute_command(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(env_file: Option<&Path>) -> Result<SepConfig> {
    let config = match env_file {
        Some(path) => SepConfig::from_env_file(path)?,
        None => {
            dotenvy::dotenv().ok();
            SepConfig::from_env()?
        }
    };
    Ok(config)
}

fn connect(config: SepConfig, negotiate_token: Option<String>) -> Result<SepClient> {
    let mut builder = SepClient::builder(config);
    if let Some(token) = negotiate_token {
        builder = builder.token_provider(Arc::new(StaticToken::new(token)));
    }
    Ok(builder.build()?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

async fn execute_command(cli: Cli) -> Result<()> {
    let config = load_config(cli.env_file.as_deref())?;

    if let Command::AuthInfo = cli.command {
        return print_json(&config.auth_info());
    }

    let negotiate_token = match config.auth.method() {
        AuthMethod::Kerberos => cli.negotiate_token,
        _ => None,
    };
    let client = connect(config, negotiate_token)?;

    match cli.command {
        Command::AuthInfo => Ok(()),
        Command::Domains(cmd) => domains(&client, cmd).await,
        Command::Products(cmd) => products(&client, cmd).await,
        Command::Tags(cmd) => tags(&client, cmd).await,
        Command::Workflow(cmd) => workflow(&client, cmd).await,
        Command::Pii(cmd) => pii_command(&client, cmd).await,
        Command::Biac(cmd) => biac(&client, cmd).await,
    }
}

async fn domains(client: &SepClient, cmd: DomainCommand) -> Result<()> {
    match cmd {
        DomainCommand::List => print_json(&client.list_domains().await?),
        DomainCommand::Get { domain_id } => print_json(&client.get_domain(&domain_id).await?),
        DomainCommand::Create {
            name,
            description,
            schema_location,
        } => {
            let request = CreateDomainRequest {
                name,
                description,
                schema_location,
            };
            print_json(&client.create_domain(&request).await?)
        }
        DomainCommand::Update {
            domain_id,
            description,
            schema_location,
        } => {
            let request = UpdateDomainRequest {
                description,
                schema_location,
            };
            print_json(&client.update_domain(&domain_id, &request).await?)
        }
        DomainCommand::Delete { domain_id } => Ok(client.delete_domain(&domain_id).await?),
    }
}

async fn products(client: &SepClient, cmd: ProductCommand) -> Result<()> {
    match cmd {
        ProductCommand::Search { search } => {
            print_json(&client.search_data_products(search.as_deref()).await?)
        }
        ProductCommand::Get { product_id } => {
            print_json(&client.get_data_product(&product_id).await?)
        }
        ProductCommand::Create { file } => {
            let params: DataProductParameters = read_json(&file)?;
            print_json(&client.create_data_product(&params).await?)
        }
        ProductCommand::Update { product_id, file } => {
            let params: DataProductParameters = read_json(&file)?;
            print_json(&client.update_data_product(&product_id, &params).await?)
        }
        ProductCommand::Clone {
            product_id,
            catalog,
            schema,
            name,
            domain,
        } => {
            let product = client
                .clone_data_product(&product_id, &catalog, &schema, &name, domain.as_deref())
                .await?;
            print_json(&product)
        }
        ProductCommand::Stats { product_id } => {
            print_json(&client.get_data_product_statistics(&product_id).await?)
        }
        ProductCommand::SampleQueries { product_id } => {
            print_json(&client.list_sample_queries(&product_id).await?)
        }
        ProductCommand::SetSampleQueries { product_id, file } => {
            let queries: Vec<SampleQuery> = read_json(&file)?;
            client.update_sample_queries(&product_id, &queries).await?;
            Ok(())
        }
        ProductCommand::RefreshMetadata { product_id, view } => print_json(
            &client
                .get_materialized_view_refresh_metadata(&product_id, &view)
                .await?,
        ),
    }
}

async fn tags(client: &SepClient, cmd: TagCommand) -> Result<()> {
    match cmd {
        TagCommand::List => print_json(&client.list_tags().await?),
        TagCommand::Get { product_id } => print_json(&client.get_tags(&product_id).await?),
        TagCommand::Set { product_id, values } => {
            print_json(&client.update_tags(&product_id, &values).await?)
        }
        TagCommand::Delete { tag_id, product_id } => {
            client.delete_tag(&tag_id, &product_id).await?;
            Ok(())
        }
        TagCommand::Usage => print_json(&client.tag_usage().await?),
    }
}

impl WaitArgs {
    fn poll_config(&self, defaults: PollConfig) -> PollConfig {
        let mut poll = defaults;
        if let Some(ms) = self.interval_ms {
            poll = poll.with_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.timeout_ms {
            poll = poll.with_timeout(Duration::from_millis(ms));
        }
        poll
    }
}

async fn finish(client: &SepClient, handle: WorkflowHandle, wait: &WaitArgs) -> Result<()> {
    if !wait.wait {
        return print_json(&serde_json::json!({
            "kind": handle.kind,
            "location": handle.location.as_str(),
        }));
    }

    let poll = wait.poll_config(client.config().poll);

    let kind = handle.kind;
    let status: WorkflowStatus = client
        .wait_for_workflow_with_progress(&handle, Some(poll), |status| {
            eprintln!("{} workflow: {}", kind, status.status);
        })
        .await?;
    print_json(&status)
}

async fn workflow(client: &SepClient, cmd: WorkflowCommand) -> Result<()> {
    match cmd {
        WorkflowCommand::Publish {
            product_id,
            force,
            wait,
        } => {
            let handle = client.publish_data_product(&product_id, force).await?;
            finish(client, handle, &wait).await
        }
        WorkflowCommand::Delete {
            product_id,
            skip_objects_delete,
            wait,
        } => {
            let handle = client
                .delete_data_product(&product_id, skip_objects_delete)
                .await?;
            finish(client, handle, &wait).await
        }
        WorkflowCommand::Refresh {
            product_id,
            view,
            wait,
        } => {
            let handle = client.refresh_materialized_view(&product_id, &view).await?;
            finish(client, handle, &wait).await
        }
        WorkflowCommand::Status { product_id, kind } => {
            let status = match kind {
                StatusKind::Publish => client.get_publish_data_product_status(&product_id).await?,
                StatusKind::Delete => client.get_delete_data_product_status(&product_id).await?,
            };
            print_json(&status)
        }
    }
}

async fn pii_command(client: &SepClient, cmd: PiiCommand) -> Result<()> {
    match cmd {
        PiiCommand::Scan { product_id } => {
            let product = client.get_data_product(&product_id).await?;
            let classification = pii::classify_columns(product.all_columns());
            print_json(&serde_json::json!({
                "productId": product.id,
                "report": classification.report(),
                "suggestedTags": pii::suggested_tags(&classification),
            }))
        }
        PiiCommand::Apply { product_id } => print_json(&client.apply_pii_tags(&product_id).await?),
        PiiCommand::Annotate {
            product_id,
            dry_run,
        } => {
            let product = client.get_data_product(&product_id).await?;
            let params = pii::annotate_data_product(&product);
            if dry_run {
                return print_json(&params);
            }
            print_json(&client.update_data_product(&product_id, &params).await?)
        }
    }
}

async fn biac(client: &SepClient, cmd: BiacCommand) -> Result<()> {
    match cmd {
        BiacCommand::Roles(cmd) => match cmd {
            RoleCommand::List => print_json(&client.list_roles().await?),
            RoleCommand::Get { role_id } => print_json(&client.get_role(role_id).await?),
            RoleCommand::Create { name, description } => {
                let request = RoleRequest { name, description };
                print_json(&client.create_role(&request).await?)
            }
            RoleCommand::Update {
                role_id,
                name,
                description,
            } => {
                let request = RoleRequest { name, description };
                print_json(&client.update_role(role_id, &request).await?)
            }
            RoleCommand::Delete { role_id } => Ok(client.delete_role(role_id).await?),
        },
        BiacCommand::Grants(cmd) => match cmd {
            GrantCommand::List { role_id } => print_json(&client.list_grants(role_id).await?),
            GrantCommand::Create {
                role_id,
                effect,
                action,
                entity,
            } => {
                let request = CreateGrantRequest {
                    effect,
                    action,
                    entity: entity.to_entity(),
                };
                print_json(&client.create_grant(role_id, &request).await?)
            }
            GrantCommand::Delete { role_id, grant_id } => {
                Ok(client.delete_grant(role_id, grant_id).await?)
            }
        },
        BiacCommand::Masks(cmd) => match cmd {
            MaskCommand::List { role_id } => print_json(&client.list_column_masks(role_id).await?),
            MaskCommand::Create {
                role_id,
                expression_id,
                entity,
            } => {
                if entity.column.is_none() {
                    bail!("column masks need --column");
                }
                let request = ExpressionBindingRequest {
                    expression_id,
                    entity: entity.to_entity(),
                };
                print_json(&client.create_column_mask(role_id, &request).await?)
            }
            MaskCommand::Delete { role_id, mask_id } => {
                Ok(client.delete_column_mask(role_id, mask_id).await?)
            }
        },
        BiacCommand::Filters(cmd) => match cmd {
            FilterCommand::List { role_id } => print_json(&client.list_row_filters(role_id).await?),
            FilterCommand::Create {
                role_id,
                expression_id,
                entity,
            } => {
                let request = ExpressionBindingRequest {
                    expression_id,
                    entity: entity.to_entity(),
                };
                print_json(&client.create_row_filter(role_id, &request).await?)
            }
            FilterCommand::Delete { role_id, filter_id } => {
                Ok(client.delete_row_filter(role_id, filter_id).await?)
            }
        },
        BiacCommand::Expressions(cmd) => match cmd {
            ExpressionCommand::List => print_json(&client.list_expressions().await?),
            ExpressionCommand::Create {
                name,
                expression,
                kind,
                description,
            } => {
                let mut request = match kind {
                    ExpressionKind::Mask => CreateExpressionRequest::column_mask(name, expression),
                    ExpressionKind::Filter => CreateExpressionRequest::row_filter(name, expression),
                };
                request.description = description;
                print_json(&client.create_expression(&request).await?)
            }
            ExpressionCommand::Delete { expression_id } => {
                Ok(client.delete_expression(expression_id).await?)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sep-ctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish_with_wait() {
        let cli = parse(&[
            "workflow",
            "publish",
            "dp-1",
            "--force",
            "--wait",
            "--timeout-ms",
            "60000",
        ]);
        match cli.command {
            Command::Workflow(WorkflowCommand::Publish {
                product_id,
                force,
                wait,
            }) => {
                assert_eq!(product_id, "dp-1");
                assert!(force);
                assert!(wait.wait);
                let poll = wait.poll_config(PollConfig::default());
                assert_eq!(poll.timeout, Duration::from_secs(60));
                assert_eq!(poll.interval, PollConfig::DEFAULT_INTERVAL);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_interval_requires_wait() {
        let result = Cli::try_parse_from([
            "sep-ctl",
            "workflow",
            "refresh",
            "dp-1",
            "mv",
            "--interval-ms",
            "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_status_kind() {
        let cli = parse(&["workflow", "status", "dp-1", "--kind", "delete"]);
        assert!(matches!(
            cli.command,
            Command::Workflow(WorkflowCommand::Status {
                kind: StatusKind::Delete,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_tag_set_requires_values() {
        assert!(Cli::try_parse_from(["sep-ctl", "tags", "set", "dp-1"]).is_err());

        let cli = parse(&["tags", "set", "dp-1", "pii-high", "finance"]);
        match cli.command {
            Command::Tags(TagCommand::Set { values, .. }) => {
                assert_eq!(values, vec!["pii-high", "finance"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_grant() {
        let cli = parse(&[
            "biac",
            "grants",
            "create",
            "7",
            "--action",
            "select",
            "--catalog",
            "hive",
            "--schema",
            "sales",
            "--table",
            "orders",
        ]);
        match cli.command {
            Command::Biac(BiacCommand::Grants(GrantCommand::Create {
                role_id,
                effect,
                action,
                entity,
            })) => {
                assert_eq!(role_id, 7);
                assert_eq!(effect, GrantEffect::Allow);
                assert_eq!(action, GrantAction::Select);

                let entity = entity.to_entity();
                assert_eq!(entity.category, EntityCategory::Tables);
                assert!(!entity.all_entities);
                assert_eq!(entity.table.as_deref(), Some("orders"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_entity_without_location_is_all_entities() {
        let cli = parse(&[
            "biac",
            "grants",
            "create",
            "1",
            "--action",
            "show",
            "--category",
            "data-products",
        ]);
        match cli.command {
            Command::Biac(BiacCommand::Grants(GrantCommand::Create { entity, .. })) => {
                let entity = entity.to_entity();
                assert_eq!(entity.category, EntityCategory::DataProducts);
                assert!(entity.all_entities);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_grant_sends_wire_casing() {
        let cli = parse(&[
            "biac",
            "grants",
            "create",
            "7",
            "--action",
            "select",
            "--effect",
            "allow-with-grant-option",
        ]);
        match cli.command {
            Command::Biac(BiacCommand::Grants(GrantCommand::Create {
                effect,
                action,
                entity,
                ..
            })) => {
                let request = CreateGrantRequest {
                    effect,
                    action,
                    entity: entity.to_entity(),
                };
                let body = serde_json::to_value(&request).unwrap();
                assert_eq!(body["effect"], "ALLOW_WITH_GRANT_OPTION");
                assert_eq!(body["action"], "SELECT");
                assert_eq!(body["entity"]["category"], "TABLES");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_wire_values_are_rejected() {
        let base = ["sep-ctl", "biac", "grants", "create", "7"];
        for extra in [
            &["--action", "selcet"][..],
            &["--action", "select", "--category", "tabels"][..],
            &["--action", "select", "--effect", "permit"][..],
        ] {
            let result = Cli::try_parse_from(base.iter().chain(extra.iter()).copied());
            let err = result.unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }

        let result = Cli::try_parse_from([
            "sep-ctl",
            "biac",
            "masks",
            "create",
            "7",
            "--expression-id",
            "21",
            "--category",
            "tabels",
            "--column",
            "ssn",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_expression_kind() {
        let cli = parse(&[
            "biac",
            "expressions",
            "create",
            "mask_ssn",
            "'XXX'",
            "--kind",
            "mask",
        ]);
        assert!(matches!(
            cli.command,
            Command::Biac(BiacCommand::Expressions(ExpressionCommand::Create {
                kind: ExpressionKind::Mask,
                ..
            }))
        ));
    }

    #[test]
    fn test_global_env_file_after_subcommand() {
        let cli = parse(&["products", "search", "--env-file", "prod.env"]);
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
    }
}
