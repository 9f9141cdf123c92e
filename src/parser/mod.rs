//! The report parser/aggregator core.
//!
//! This module turns raw JUnit-style XML into a [`ReportAggregate`]:
//! declared totals read from the report root plus an ordered, optionally
//! truncated list of per-case records. It is stateless and performs no I/O;
//! callers hand it the already-loaded document text.

use crate::models::{ReportAggregate, TestCaseRecord, TestStatus, MISSING_FIELD};
use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::debug;

/// Errors produced by a parse invocation.
///
/// A malformed document is the only input that fails the malformed kind;
/// everything else during extraction is tolerated by defaulting. No partial
/// aggregate is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("Error parsing XML: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// Any other failure during extraction.
    #[allow(dead_code)] // Extraction currently defaults instead of failing
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Parses one report and materializes at most `limit` test cases.
///
/// The limit is a selection policy, not a sampling one: it always keeps the
/// earliest cases in document order. `None` keeps every case. Declared
/// `tests`/`failures` attributes on the root are trusted verbatim; missing
/// or non-numeric values coerce to `0`.
pub fn parse_report(source: &str, limit: Option<usize>) -> Result<ReportAggregate, ParseError> {
    let doc = Document::parse(source)?;
    let root = doc.root_element();

    let total_declared = declared_count(root.attribute("tests"));
    let failures_declared = declared_count(root.attribute("failures"));

    let cases: Vec<TestCaseRecord> = root
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("testcase"))
        .take(limit.unwrap_or(usize::MAX))
        .map(extract_case)
        .collect();

    debug!(
        "Parsed report: declared {}/{} (tests/failures), {} cases selected",
        total_declared,
        failures_declared,
        cases.len()
    );

    Ok(ReportAggregate {
        total_declared,
        failures_declared,
        cases,
    })
}

/// Extracts one case record from a `testcase` element.
///
/// Status is a pure function of the failure marker: a `<failure>` child
/// means `Failed` regardless of its content, anything else means `Passed`.
fn extract_case(node: Node) -> TestCaseRecord {
    let name = node.attribute("name").unwrap_or(MISSING_FIELD).to_string();
    let classname = node
        .attribute("classname")
        .unwrap_or(MISSING_FIELD)
        .to_string();
    let duration = case_duration(node.attribute("time"));

    let failed = node
        .children()
        .any(|c| c.is_element() && c.has_tag_name("failure"));

    TestCaseRecord {
        name,
        classname,
        duration,
        status: if failed {
            TestStatus::Failed
        } else {
            TestStatus::Passed
        },
    }
}

/// Coerces a declared count attribute, defaulting to `0`.
fn declared_count(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Coerces a `time` attribute to a non-negative finite duration.
fn case_duration(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite() && *t >= 0.0)
        .unwrap_or(0.0)
}
