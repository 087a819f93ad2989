//! CLI argument parsing using clap.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// datacheck - verify that datasets exist
#[derive(Parser, Debug)]
#[command(name = "datacheck")]
#[command(
    about = "Check that datasets exist in databases, the metadata table, or web portals",
    long_about = None
)]
#[command(version)]
pub struct Args {
    /// Dataset identifiers (`schema.table`, `db.schema.table`, an item id, or a dataset title)
    #[arg(value_name = "IDENTIFIERS", required = true)]
    pub identifiers: Vec<String>,

    /// Backend to check against
    #[arg(short, long, value_enum)]
    pub backend: BackendArg,

    /// Connection string, or the name of a connection from the config file
    #[arg(short = 'C', long, value_name = "CONNECTION", env = "DATACHECK_CONNECTION")]
    pub connection: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "DATACHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Backend options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// PostgreSQL information_schema
    Postgres,
    /// SQL Server INFORMATION_SCHEMA
    Mssql,
    /// MySQL information_schema
    Mysql,
    /// Governance metadata table
    Meta,
    /// ArcGIS Online item
    Agol,
    /// Open data portal page
    OpenData,
}

impl BackendArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mssql => "mssql",
            Self::Mysql => "mysql",
            Self::Meta => "meta",
            Self::Agol => "agol",
            Self::OpenData => "open-data",
        }
    }

    /// Whether the backend is reached over HTTP rather than a database connection.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Agol | Self::OpenData)
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}
