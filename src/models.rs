//! Data models for the test-report analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing test cases, aggregates, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used when a source attribute is absent.
pub const MISSING_FIELD: &str = "N/A";

/// Outcome of a single test case.
///
/// A case is `Failed` iff its source element carries a failure-marker child;
/// every other case is `Passed`. No skipped/errored distinction is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// Test completed without a failure marker
    Passed,
    /// Test carried a failure marker
    Failed,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "PASSED"),
            TestStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl TestStatus {
    /// Returns an emoji representation of the status.
    pub fn emoji(&self) -> &'static str {
        match self {
            TestStatus::Passed => "✅",
            TestStatus::Failed => "❌",
        }
    }
}

/// One executed test case extracted from a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Test name (`"N/A"` when the source attribute is absent).
    pub name: String,
    /// Grouping/namespace of the test (same default policy).
    pub classname: String,
    /// Execution time in seconds. Never negative; `0.0` when absent
    /// or unparsable.
    #[serde(rename = "time")]
    pub duration: f64,
    /// Pass/fail outcome.
    pub status: TestStatus,
}

impl TestCaseRecord {
    /// Whether this case carried a failure marker.
    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// One parsed report: declared totals plus the selected case list.
///
/// The declared totals describe the whole report as its producer declared
/// it; `cases` is a possibly-truncated view in document order and is not
/// guaranteed to sum to the declared counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAggregate {
    /// Declared `tests` count from the report root (`0` when absent).
    pub total_declared: i64,
    /// Declared `failures` count from the report root (`0` when absent).
    pub failures_declared: i64,
    /// Selected test cases, in source document order.
    pub cases: Vec<TestCaseRecord>,
}

impl ReportAggregate {
    /// Declared pass count, `tests - failures`.
    ///
    /// Declared counts are trusted verbatim, so an inconsistent report
    /// yields a negative value here rather than a clamped one.
    pub fn passed_declared(&self) -> i64 {
        self.total_declared - self.failures_declared
    }
}

/// Duration statistics over a non-empty case selection, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary statistics computed over the *selected* case list.
///
/// These deliberately ignore the declared totals: a truncated selection
/// summarizes what was selected, nothing more.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of selected cases that passed.
    pub passed: usize,
    /// Number of selected cases that failed.
    pub failed: usize,
    /// Duration statistics; `None` when no cases were selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durations: Option<DurationStats>,
}

impl SummaryStats {
    /// Computes summary statistics from a case selection.
    pub fn from_cases(cases: &[TestCaseRecord]) -> Self {
        let mut stats = Self::default();

        for case in cases {
            match case.status {
                TestStatus::Passed => stats.passed += 1,
                TestStatus::Failed => stats.failed += 1,
            }
        }

        if !cases.is_empty() {
            let sum: f64 = cases.iter().map(|c| c.duration).sum();
            let min = cases.iter().map(|c| c.duration).fold(f64::INFINITY, f64::min);
            let max = cases
                .iter()
                .map(|c| c.duration)
                .fold(f64::NEG_INFINITY, f64::max);

            stats.durations = Some(DurationStats {
                mean: sum / cases.len() as f64,
                min,
                max,
            });
        }

        stats
    }

    /// Total number of selected cases.
    pub fn selected(&self) -> usize {
        self.passed + self.failed
    }
}

/// Metadata about a rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the parsed XML file.
    pub source: String,
    /// Date and time the report was parsed.
    pub parsed_at: DateTime<Utc>,
    /// Declared test count from the report root.
    pub total_declared: i64,
    /// Declared failure count from the report root.
    pub failures_declared: i64,
    /// Derived declared pass count (may be negative).
    pub passed_declared: i64,
    /// Number of cases materialized after the selection limit.
    pub cases_selected: usize,
}

/// The complete rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Summary statistics over the selected cases.
    pub summary: SummaryStats,
    /// Selected test cases, in source document order.
    pub cases: Vec<TestCaseRecord>,
}

impl Report {
    /// Builds a report from a parsed aggregate.
    pub fn from_aggregate(source: &str, aggregate: &ReportAggregate) -> Self {
        let metadata = ReportMetadata {
            source: source.to_string(),
            parsed_at: Utc::now(),
            total_declared: aggregate.total_declared,
            failures_declared: aggregate.failures_declared,
            passed_declared: aggregate.passed_declared(),
            cases_selected: aggregate.cases.len(),
        };

        Self {
            metadata,
            summary: SummaryStats::from_cases(&aggregate.cases),
            cases: aggregate.cases.clone(),
        }
    }
}
