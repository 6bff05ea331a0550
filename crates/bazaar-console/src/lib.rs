//! Bazaar Console
//!
//! Command line front end over the funnel and access crates. Commands read
//! their inputs from files or arguments and return the rendered output, so
//! `main` only parses, initialises logging and prints.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod render;

pub use cli::{Cli, Command, FunnelArgs, OutputFormat, PermissionsArgs};

use anyhow::Context;
use bazaar_access::{Partition, Role, RolePermissionResolver};
use bazaar_funnel::{AnalyticsConfig, FunnelCounts, FunnelMetricsCalculator, FunnelSnapshot};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Run a parsed command and return its output
///
/// # Errors
/// Propagates I/O, parse, configuration and domain errors with context.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    match &cli.command {
        Command::Funnel(args) => run_funnel(args),
        Command::Permissions(args) => run_permissions(args),
        Command::Roles => Ok(render::roles()),
    }
}

/// Load and validate an analytics config file
///
/// # Errors
/// Fails when the file cannot be read or is not a valid config.
pub fn load_config(path: &Path) -> anyhow::Result<AnalyticsConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = AnalyticsConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded analytics config");
    Ok(config)
}

fn run_funnel(args: &FunnelArgs) -> anyhow::Result<String> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalyticsConfig::default(),
    };
    if let Some(top) = args.top {
        config = config.with_top_abandonment_points(top);
    }
    if let Some(revenue) = args.revenue_per_lost_user {
        config = config.with_revenue_per_lost_user(revenue);
    }
    config.validate()?;

    let raw = fs::read_to_string(&args.snapshot)
        .with_context(|| format!("failed to read snapshot {}", args.snapshot.display()))?;
    let counts: FunnelCounts = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", args.snapshot.display()))?;

    let report = FunnelMetricsCalculator::new(config).report(&FunnelSnapshot::from(counts))?;
    tracing::info!(
        stages = report.funnel.stages().len(),
        users_lost = report.funnel.total_users_lost(),
        "funnel report ready"
    );

    match args.format {
        OutputFormat::Text => Ok(render::funnel_report(&report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

fn run_permissions(args: &PermissionsArgs) -> anyhow::Result<String> {
    let role: Role = args.role.parse()?;
    let partitions: BTreeSet<Partition> = args
        .partitions
        .iter()
        .map(|p| Partition::new(p.as_str()))
        .collect();
    let set = RolePermissionResolver::new().resolve(role, &partitions);

    match args.format {
        OutputFormat::Text => Ok(render::permissions(role, &args.partitions, &set)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "role": role,
            "partitions": partitions,
            "permissions": set,
        }))?),
    }
}
