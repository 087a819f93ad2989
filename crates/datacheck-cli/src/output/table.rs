//! Human-readable table output formatting.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;

use crate::check::{CheckReport, CheckStatus};

/// Format check reports as human-readable text with optional colors.
pub fn format_table(reports: &[CheckReport], use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, colored);
    write_results(&mut out, reports, colored);
    write_summary(&mut out, reports, colored);

    out
}

fn write_header(out: &mut String, colored: bool) {
    let title = "datacheck";
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }
    writeln!(out).unwrap();
}

fn status_label(status: &CheckStatus, colored: bool) -> String {
    let label = match status {
        CheckStatus::Exists => "EXISTS",
        CheckStatus::Missing => "MISSING",
        CheckStatus::Incomplete => "INCOMPLETE",
        CheckStatus::Error => "ERROR",
    };
    // Pad before coloring so escape codes don't skew the column width.
    let padded = format!("{label:<10}");

    if !colored {
        return padded;
    }

    match status {
        CheckStatus::Exists => padded.green().to_string(),
        CheckStatus::Missing | CheckStatus::Error => padded.red().to_string(),
        CheckStatus::Incomplete => padded.yellow().to_string(),
    }
}

fn write_results(out: &mut String, reports: &[CheckReport], colored: bool) {
    if reports.is_empty() {
        return;
    }

    let width = reports
        .iter()
        .map(|r| r.identifier.chars().count())
        .max()
        .unwrap_or(0);

    for report in reports {
        let status = status_label(&report.status, colored);
        let detail = report.detail.as_deref().unwrap_or_default();

        let line = format!(
            "  [{}] {} {:<width$}  {}",
            report.backend, status, report.identifier, detail
        );
        writeln!(out, "{}", line.trim_end()).unwrap();
    }
    writeln!(out).unwrap();
}

fn write_summary(out: &mut String, reports: &[CheckReport], colored: bool) {
    let count = |status: CheckStatus| reports.iter().filter(|r| r.status == status).count();

    let summary = format!(
        "{} checked: {} exist, {} missing, {} incomplete, {} errors",
        reports.len(),
        count(CheckStatus::Exists),
        count(CheckStatus::Missing),
        count(CheckStatus::Incomplete),
        count(CheckStatus::Error),
    );

    if colored {
        writeln!(out, "{}", summary.bold()).unwrap();
    } else {
        writeln!(out, "{summary}").unwrap();
    }
}
