//! Command line definition

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Marketplace admin analytics and access tools
#[derive(Debug, Parser)]
#[command(name = "bazaar", version, about)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Annotate a funnel snapshot and rank its abandonment points
    Funnel(FunnelArgs),
    /// Resolve the permissions a role grants
    Permissions(PermissionsArgs),
    /// List staff roles
    Roles,
}

/// Arguments for `bazaar funnel`
#[derive(Debug, Args)]
pub struct FunnelArgs {
    /// JSON file with the analytics funnel record
    pub snapshot: PathBuf,

    /// TOML analytics configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of abandonment points to report
    #[arg(long)]
    pub top: Option<usize>,

    /// Revenue attributed to each lost user
    #[arg(long)]
    pub revenue_per_lost_user: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `bazaar permissions`
#[derive(Debug, Args)]
pub struct PermissionsArgs {
    /// Role id, e.g. `operations_manager`
    pub role: String,

    /// Assigned partition; repeat for several
    #[arg(long = "partition")]
    pub partitions: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_funnel_flags() {
        let cli = Cli::try_parse_from([
            "bazaar",
            "funnel",
            "week.json",
            "--top",
            "2",
            "--revenue-per-lost-user",
            "99.5",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::Funnel(args) = cli.command else {
            panic!("expected funnel command");
        };
        assert_eq!(args.snapshot, PathBuf::from("week.json"));
        assert_eq!(args.top, Some(2));
        assert_eq!(args.revenue_per_lost_user, Some(99.5));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn parses_repeated_partitions() {
        let cli = Cli::try_parse_from([
            "bazaar",
            "--log-json",
            "permissions",
            "viewer",
            "--partition",
            "products",
            "--partition",
            "services",
        ])
        .unwrap();

        assert!(cli.log_json);
        let Command::Permissions(args) = cli.command else {
            panic!("expected permissions command");
        };
        assert_eq!(args.role, "viewer");
        assert_eq!(args.partitions, vec!["products", "services"]);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn negative_top_rejected() {
        assert!(Cli::try_parse_from(["bazaar", "funnel", "x.json", "--top", "-1"]).is_err());
    }
}
