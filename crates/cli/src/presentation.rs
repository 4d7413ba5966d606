// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use customer_importer_engine::report::SortedReport;
use customer_importer_engine::stats::{RunResult, RunSummary};
use std::fmt::Write;

/// Render the report for stdout.
///
/// `OutputFormat::Log` yields `None`: the engine has already logged each
/// domain in order and nothing goes to stdout.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(result: &RunResult, format: OutputFormat) -> Result<Option<String>> {
    let rendered = match format {
        OutputFormat::Log => return Ok(None),
        OutputFormat::Table => render_table(&result.report, &result.summary),
        OutputFormat::Csv => render_csv(&result.report),
        OutputFormat::Json => render_json(result)?,
    };
    Ok(Some(rendered))
}

fn render_table(report: &SortedReport, summary: &RunSummary) -> String {
    let total_label = format!("TOTAL ({} domains)", report.len());
    let width = report
        .iter()
        .map(|entry| entry.domain.len())
        .max()
        .unwrap_or(0)
        .max("DOMAIN".len())
        .max(total_label.len());

    let mut out = String::new();
    let _ = writeln!(out, "customer_importer v{}", crate::VERSION);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<width$}  {:>9}", "DOMAIN", "CUSTOMERS");
    let _ = writeln!(out, "{}", "-".repeat(width + 11));
    for entry in report {
        let _ = writeln!(out, "{:<width$}  {:>9}", entry.domain, entry.count);
    }
    let _ = writeln!(out, "---");
    let _ = writeln!(
        out,
        "{total_label:<width$}  {:>9}",
        report.total()
    );
    let _ = writeln!(out);
    let _ = write!(
        out,
        "[customer_importer] Completed: {} records, {} skipped in {} ms.",
        summary.records_read,
        summary.invalid_records + summary.read_errors,
        summary.elapsed.as_millis()
    );
    out
}

fn render_csv(report: &SortedReport) -> String {
    let mut out = String::from("domain,count");
    for entry in report {
        out.push('\n');
        let domain = &entry.domain;
        if domain.contains(',') || domain.contains('"') || domain.contains('\n') {
            let escaped = domain.replace('"', "\"\"");
            let _ = write!(out, "\"{escaped}\"");
        } else {
            out.push_str(domain);
        }
        let _ = write!(out, ",{}", entry.count);
    }
    out
}

fn render_json(result: &RunResult) -> Result<String> {
    let summary = &result.summary;
    let value = serde_json::json!({
        "version": crate::VERSION,
        "domains": &result.report,
        "summary": {
            "records_read": summary.records_read,
            "valid_records": summary.valid_records,
            "invalid_records": summary.invalid_records,
            "read_errors": summary.read_errors,
            "time_taken_ms": summary.elapsed.as_millis(),
        },
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
