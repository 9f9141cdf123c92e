//! Case aggregation and statistics.
//!
//! This module provides utilities for summarizing the selected test cases
//! and preparing the plain-text summary consumed by text areas and prompts.
//!
//! All statistics here are computed over the *selected* (possibly
//! truncated) case list. Declared totals come from the report root and are
//! reported alongside, never mixed into the computed counts.

use crate::models::{ReportMetadata, SummaryStats, TestCaseRecord};
use std::collections::HashMap;

/// Group cases by their classname.
pub fn group_by_classname(cases: &[TestCaseRecord]) -> HashMap<String, Vec<TestCaseRecord>> {
    let mut grouped: HashMap<String, Vec<TestCaseRecord>> = HashMap::new();

    for case in cases {
        grouped
            .entry(case.classname.clone())
            .or_default()
            .push(case.clone());
    }

    grouped
}

/// Get the N slowest cases, longest first.
pub fn slowest_cases(cases: &[TestCaseRecord], n: usize) -> Vec<TestCaseRecord> {
    let mut sorted: Vec<TestCaseRecord> = cases.to_vec();
    sorted.sort_by(|a, b| {
        b.duration
            .partial_cmp(&a.duration)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

/// Get the failed cases, in document order.
pub fn failed_cases(cases: &[TestCaseRecord]) -> Vec<&TestCaseRecord> {
    cases.iter().filter(|c| c.is_failed()).collect()
}

/// Generate the labelled key/value summary block.
///
/// This is the text handed to text areas and to the LLM indexing prompt:
/// declared totals first, then pass/fail counts and duration statistics over
/// the selected cases. An empty selection reports an explicit no-data line
/// instead of statistics.
pub fn generate_summary_text(metadata: &ReportMetadata, stats: &SummaryStats) -> String {
    let mut lines = Vec::new();

    lines.push("Test Summary:".to_string());
    lines.push(format!("Total Tests: {}", metadata.total_declared));
    lines.push(format!("Failed Tests: {}", metadata.failures_declared));
    lines.push(format!("Passed Tests: {}", metadata.passed_declared));
    lines.push(format!(
        "Selected Cases: {} ({} passed, {} failed)",
        stats.selected(),
        stats.passed,
        stats.failed
    ));

    match stats.durations {
        Some(durations) => {
            lines.push(format!("Average Execution Time: {:.2}s", durations.mean));
            lines.push(format!("Max Execution Time: {:.2}s", durations.max));
            lines.push(format!("Min Execution Time: {:.2}s", durations.min));
        }
        None => lines.push("No test cases selected.".to_string()),
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Report, ReportAggregate, TestStatus};

    fn case(name: &str, classname: &str, duration: f64, status: TestStatus) -> TestCaseRecord {
        TestCaseRecord {
            name: name.to_string(),
            classname: classname.to_string(),
            duration,
            status,
        }
    }

    #[test]
    fn test_group_by_classname() {
        let cases = vec![
            case("a", "auth", 0.5, TestStatus::Passed),
            case("b", "auth", 1.2, TestStatus::Failed),
            case("c", "db", 0.1, TestStatus::Passed),
        ];

        let grouped = group_by_classname(&cases);

        assert_eq!(grouped.get("auth").map(|v| v.len()), Some(2));
        assert_eq!(grouped.get("db").map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_slowest_cases() {
        let cases = vec![
            case("fast", "c", 0.1, TestStatus::Passed),
            case("slow", "c", 3.0, TestStatus::Passed),
            case("mid", "c", 1.0, TestStatus::Failed),
        ];

        let slowest = slowest_cases(&cases, 2);

        assert_eq!(slowest.len(), 2);
        assert_eq!(slowest[0].name, "slow");
        assert_eq!(slowest[1].name, "mid");
    }

    #[test]
    fn test_failed_cases_keep_document_order() {
        let cases = vec![
            case("a", "c", 0.5, TestStatus::Failed),
            case("b", "c", 1.2, TestStatus::Passed),
            case("d", "c", 0.1, TestStatus::Failed),
        ];

        let failed = failed_cases(&cases);
        let names: Vec<_> = failed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "d"]);
    }

    #[test]
    fn test_generate_summary_text() {
        let aggregate = ReportAggregate {
            total_declared: 3,
            failures_declared: 1,
            cases: vec![
                case("a", "c", 0.5, TestStatus::Passed),
                case("b", "c", 1.2, TestStatus::Failed),
                case("d", "c", 0.1, TestStatus::Passed),
            ],
        };
        let report = Report::from_aggregate("results.xml", &aggregate);

        let text = generate_summary_text(&report.metadata, &report.summary);

        assert!(text.contains("Total Tests: 3"));
        assert!(text.contains("Failed Tests: 1"));
        assert!(text.contains("Passed Tests: 2"));
        assert!(text.contains("Selected Cases: 3 (2 passed, 1 failed)"));
        assert!(text.contains("Average Execution Time: 0.60s"));
        assert!(text.contains("Max Execution Time: 1.20s"));
        assert!(text.contains("Min Execution Time: 0.10s"));
    }

    #[test]
    fn test_generate_summary_text_empty_selection() {
        let aggregate = ReportAggregate {
            total_declared: 2,
            failures_declared: 5,
            cases: Vec::new(),
        };
        let report = Report::from_aggregate("odd.xml", &aggregate);

        let text = generate_summary_text(&report.metadata, &report.summary);

        // Inconsistent declared counts pass through untouched.
        assert!(text.contains("Passed Tests: -3"));
        assert!(text.contains("No test cases selected."));
        assert!(!text.contains("Average Execution Time"));
    }
}
