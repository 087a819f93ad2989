//! Logging setup, powered by tracing-subscriber.
//!
//! Logs go to stderr so they never mix with report output. `RUST_LOG`
//! overrides the level chosen from the command line.

use tracing_subscriber::EnvFilter;

/// Base filter directive for the given verbosity.
pub fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "warn",
        1 => "info,datacheck_core=debug,datacheck_cli=debug",
        _ => "debug",
    }
}

/// Build the filter, suppressing noisy driver crates unless fully verbose.
fn build_env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = vec![level_directive(verbose, quiet).to_string()];
    if verbose < 2 {
        for noisy in ["sqlx", "tiberius", "hyper", "reqwest", "rustls"] {
            directives.push(format!("{noisy}=warn"));
        }
    }

    EnvFilter::new(directives.join(","))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .compact()
        .try_init();
}
