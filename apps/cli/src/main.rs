//! chartform - print the form layout derived from a FHIR StructureDefinition

mod config;
mod logging;

use anyhow::Context;
use chartform_groups::{fallback_groups, ResourceKind, StructureGroupBuilder};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "chartform", version, about = "Derive form groups from FHIR StructureDefinitions")]
struct Cli {
    /// Configuration file (defaults to ./chartform.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL serving structure-definition-<type>.json documents
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding structure-definition-<type>.json documents
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Request timeout for the HTTP source
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Only list medication fields the definition declares
    #[arg(long, global = true)]
    strict_medication: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the form groups for a resource type
    Groups {
        resource_type: String,
        /// Fail instead of printing the fallback table
        #[arg(long)]
        no_fallback: bool,
    },
    /// Print rendering metadata for every field of a resource type
    Fields { resource_type: String },
    /// Print the built-in fallback table for a resource type
    Fallback { resource_type: String },
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.source.base_url = Some(base_url.clone());
            config.source.dir = None;
        }
        if let Some(dir) = &self.dir {
            config.source.dir = Some(dir.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            config.source.timeout_seconds = timeout;
        }
        if self.strict_medication {
            config.grouping.strict_medication = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    match &cli.command {
        Command::Groups {
            resource_type,
            no_fallback,
        } => {
            let builder = group_builder(&config)?;
            let groups = if *no_fallback {
                builder
                    .try_build_groups(resource_type)
                    .await
                    .with_context(|| format!("Failed to build groups for {resource_type}"))?
            } else {
                builder.build_groups(resource_type).await
            };
            print_json(&groups, cli.pretty)
        }
        Command::Fields { resource_type } => {
            let fields = group_builder(&config)?
                .describe_fields(resource_type)
                .await
                .with_context(|| format!("Failed to describe fields of {resource_type}"))?;
            print_json(&fields, cli.pretty)
        }
        Command::Fallback { resource_type } => {
            let kind = ResourceKind::parse(resource_type)?;
            print_json(&fallback_groups(&kind), cli.pretty)
        }
    }
}

fn group_builder(config: &Config) -> anyhow::Result<StructureGroupBuilder> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    Ok(StructureGroupBuilder::new(config.source.build()?).with_options(config.grouping.options()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
