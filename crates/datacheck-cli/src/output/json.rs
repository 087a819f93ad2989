//! JSON output formatting.

use serde::Serialize;

use crate::check::CheckReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    results: &'a [CheckReport],
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    exists: usize,
    failing: usize,
}

/// Format check reports as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(reports: &[CheckReport], compact: bool) -> serde_json::Result<String> {
    let exists = reports.iter().filter(|r| r.is_exists()).count();
    let report = JsonReport {
        summary: Summary {
            total: reports.len(),
            exists,
            failing: reports.len() - exists,
        },
        results: reports,
    };

    if compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
}
