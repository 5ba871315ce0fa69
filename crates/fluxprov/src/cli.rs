//! Clap derive structures for the `fluxprov` CLI.
//!
//! Every subcommand runs exactly one mapper operation, reading attribute
//! and state documents as JSON and printing the resulting state.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fluxprov -- declarative management of InfluxDB v2 resources
#[derive(Debug, Parser)]
#[command(
    name = "fluxprov",
    version,
    about = "Create, read, update and delete InfluxDB v2 resources from JSON documents",
    long_about = "Drives the fluxprov resource mappers one operation at a time.\n\n\
        Attribute documents are JSON objects using the schema names shown by\n\
        `fluxprov schema`. State documents are {\"id\": ..., \"attrs\": {...}}.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file holding a [provider] table
    #[arg(long, env = "FLUXPROV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Server URL (overrides the config file and INFLUXDB_V2_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token (overrides the config file and INFLUXDB_V2_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Accept any TLS certificate
    #[arg(long, short = 'k', global = true)]
    pub skip_ssl_verify: bool,

    /// Bootstrap health-check endpoint
    #[arg(long, global = true)]
    pub health_check: Option<HealthCheckArg>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HealthCheckArg {
    Ready,
    Ping,
}

impl HealthCheckArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Ping => "ping",
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a resource from an attribute document
    Create(CreateArgs),

    /// Refresh a resource from the server
    Read(StateArgs),

    /// Move a resource to a new attribute document
    Update(UpdateArgs),

    /// Delete a resource
    Delete(StateArgs),

    /// Query a data source (ready, organization, bucket)
    #[command(alias = "data")]
    Lookup(LookupArgs),

    /// Check that the server answers /ready
    Ready,

    /// Print attribute tables
    Schema(SchemaArgs),

    /// Inspect provider configuration
    Config(ConfigArgs),
}

// ── Resource operations ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Resource type (`bucket` or `influxdb-v2_bucket`)
    pub resource_type: String,

    /// Attribute document (JSON file, or `-` for stdin)
    #[arg(long, short = 'a')]
    pub attrs: PathBuf,
}

#[derive(Debug, Args)]
pub struct StateArgs {
    /// Resource type (`bucket` or `influxdb-v2_bucket`)
    pub resource_type: String,

    /// State document from a previous operation (JSON file, or `-`)
    #[arg(long, short = 's')]
    pub state: PathBuf,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Resource type (`bucket` or `influxdb-v2_bucket`)
    pub resource_type: String,

    /// Current state document (JSON file, or `-`)
    #[arg(long, short = 's')]
    pub state: PathBuf,

    /// Desired attribute document (JSON file, or `-`)
    #[arg(long, short = 'a')]
    pub attrs: PathBuf,
}

// ── Data sources ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Data source type (`ready`, `organization`, `bucket`)
    pub data_source: String,

    /// Lookup arguments as inline JSON
    #[arg(long, default_value = "{}", conflicts_with = "query_file")]
    pub query: String,

    /// Lookup arguments from a JSON file
    #[arg(long)]
    pub query_file: Option<PathBuf>,
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Only this type (resource or data source)
    pub type_name: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective provider settings (token redacted)
    Show,
    /// Print the config file path
    Path,
}
