//! Report generation.
//!
//! This module renders a parsed [`Report`] as plain text, Markdown, or
//! JSON. Rendering never re-reads the source document; everything comes
//! from the aggregate the parser produced.

use crate::analysis::charts::{duration_series, pie_slices, PieSlice, SeriesPoint};
use crate::analysis::{failed_cases, generate_summary_text, group_by_classname, slowest_cases};
use crate::models::{Report, ReportMetadata};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// How many entries the slowest-cases table shows.
const SLOWEST_CASES_SHOWN: usize = 5;

/// Generate the plain-text report: per-case listing plus the summary block.
///
/// This is also the payload pushed to the LLM for indexing.
pub fn generate_text_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("Test Case Details:\n");
    for case in &report.cases {
        output.push_str(&format!(
            "<testcase name=\"{}\"\n          classname=\"{}\"\n          time=\"{}\"\n          status=\"{}\" />\n",
            case.name, case.classname, case.duration, case.status
        ));
    }

    output.push('\n');
    output.push_str(&generate_summary_text(&report.metadata, &report.summary));
    output.push('\n');

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# TestLens Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(report));
    output.push_str(&generate_cases_section(report));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Parsed:** {}\n",
        metadata.parsed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Declared Tests:** {}\n",
        metadata.total_declared
    ));
    section.push_str(&format!(
        "- **Declared Failures:** {}\n",
        metadata.failures_declared
    ));
    section.push_str(&format!(
        "- **Declared Passed:** {}\n",
        metadata.passed_declared
    ));
    section.push_str(&format!(
        "- **Cases Selected:** {}\n",
        metadata.cases_selected
    ));
    section.push('\n');

    section
}

/// Generate the summary section over the selected cases.
fn generate_summary_section(report: &Report) -> String {
    let summary = &report.summary;
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| ✅ Passed | ❌ Failed | **Selected** |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | **{}** |\n\n",
        summary.passed,
        summary.failed,
        summary.selected()
    ));

    match summary.durations {
        Some(durations) => {
            section.push_str("| Avg Time | Max Time | Min Time |\n");
            section.push_str("|:---:|:---:|:---:|\n");
            section.push_str(&format!(
                "| {:.2}s | {:.2}s | {:.2}s |\n\n",
                durations.mean, durations.max, durations.min
            ));
        }
        None => section.push_str("No test cases selected.\n\n"),
    }

    // Classname distribution
    let grouped = group_by_classname(&report.cases);
    if !grouped.is_empty() {
        section.push_str("### Cases by Classname\n\n");
        section.push_str("| Classname | Cases | Failed |\n");
        section.push_str("|:---|:---:|:---:|\n");

        let mut classnames: Vec<_> = grouped.iter().collect();
        classnames.sort_by_key(|(_, cases)| std::cmp::Reverse(cases.len()));

        for (classname, cases) in classnames {
            let failed = cases.iter().filter(|c| c.is_failed()).count();
            section.push_str(&format!(
                "| `{}` | {} | {} |\n",
                classname,
                cases.len(),
                failed
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the per-case tables.
fn generate_cases_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Test Cases\n\n");

    if report.cases.is_empty() {
        section.push_str("No test cases were selected from this report.\n\n");
        return section;
    }

    section.push_str("| Name | Classname | Time | Status |\n");
    section.push_str("|:---|:---|:---:|:---:|\n");
    for case in &report.cases {
        section.push_str(&format!(
            "| `{}` | `{}` | {:.2}s | {} {} |\n",
            case.name,
            case.classname,
            case.duration,
            case.status.emoji(),
            case.status
        ));
    }
    section.push('\n');

    let failed = failed_cases(&report.cases);
    if !failed.is_empty() {
        section.push_str("### Failed Cases\n\n");
        section.push_str("| Name | Classname | Time |\n");
        section.push_str("|:---|:---|:---:|\n");
        for case in failed {
            section.push_str(&format!(
                "| `{}` | `{}` | {:.2}s |\n",
                case.name, case.classname, case.duration
            ));
        }
        section.push('\n');
    }

    let slowest = slowest_cases(&report.cases, SLOWEST_CASES_SHOWN);
    if slowest.len() > 1 {
        section.push_str("### Slowest Cases\n\n");
        section.push_str("| Name | Time |\n");
        section.push_str("|:---|:---:|\n");
        for case in &slowest {
            section.push_str(&format!("| `{}` | {:.2}s |\n", case.name, case.duration));
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by TestLens*\n".to_string()
}

/// JSON payload: the report plus precomputed chart series for renderers.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    charts: ChartBundle,
}

#[derive(Debug, Serialize)]
struct ChartBundle {
    duration_series: Vec<SeriesPoint>,
    status_slices: Vec<PieSlice>,
}

/// Generate a JSON report, chart series included.
pub fn generate_json_report(report: &Report) -> Result<String> {
    let payload = JsonReport {
        report,
        charts: ChartBundle {
            duration_series: duration_series(&report.cases),
            status_slices: pie_slices(&report.summary),
        },
    };

    serde_json::to_string_pretty(&payload).map_err(Into::into)
}

/// Write a rendered report to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
