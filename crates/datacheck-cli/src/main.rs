//! datacheck CLI - dataset existence checker

use datacheck_cli::backend::{DatabaseConnector, ReqwestHttpClient};
use datacheck_cli::check::CheckContext;
use datacheck_cli::cli;
use datacheck_cli::config::Config;
use datacheck_cli::logging;
use datacheck_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

use cli::{Args, OutputFormat};
use output::{format_json, format_table};

/// At least one dataset is missing, incomplete, or could not be checked.
const EXIT_FAILURE: u8 = 1;
/// Configuration error (unreadable config file, unwritable output, ...).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(all_exist) => {
            if all_exist {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
        Err(e) => {
            eprintln!("datacheck: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    logging::init_logging(args.verbose, args.quiet);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let connection = config.resolve_connection(args.connection.as_deref());

    let http = if args.backend.is_remote() {
        Some(
            ReqwestHttpClient::new(config.http.timeout())
                .context("Failed to build HTTP client")?,
        )
    } else {
        None
    };

    debug!(
        backend = args.backend.as_str(),
        identifiers = args.identifiers.len(),
        "starting checks"
    );

    let context = CheckContext {
        backend: args.backend,
        connection: connection.as_deref(),
        connector: DatabaseConnector,
        http,
        meta_layout: &config.meta_table,
    };
    let reports = context.run_all(&args.identifiers);
    let all_exist = reports.iter().all(|report| report.is_exists());

    let content = match args.format {
        OutputFormat::Table => format_table(&reports, args.output.is_none()),
        OutputFormat::Json => {
            format_json(&reports, args.compact).context("Failed to serialize report")?
        }
    };

    write_output(&args.output, &content)?;

    Ok(all_exist)
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
