//! Chart-series construction for downstream renderers.
//!
//! The analyzer does not draw anything; it prepares serializable series
//! that a bar/pie/line renderer can consume directly. Series preserve the
//! selection's document order.

use crate::models::{SummaryStats, TestCaseRecord, TestStatus};
use serde::{Deserialize, Serialize};

/// One point in a duration series (bar or line chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Test name, the x axis.
    pub name: String,
    /// Execution time in seconds, the y axis.
    #[serde(rename = "time")]
    pub duration: f64,
    /// Pass/fail outcome, the color dimension.
    pub status: TestStatus,
}

/// One slice of the pass/fail pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// Build the execution-time series used by bar and line charts.
pub fn duration_series(cases: &[TestCaseRecord]) -> Vec<SeriesPoint> {
    cases
        .iter()
        .map(|case| SeriesPoint {
            name: case.name.clone(),
            duration: case.duration,
            status: case.status,
        })
        .collect()
}

/// Build the pass/fail pie slices from the selected-case counts.
pub fn pie_slices(stats: &SummaryStats) -> Vec<PieSlice> {
    vec![
        PieSlice {
            label: "Passed".to_string(),
            count: stats.passed,
        },
        PieSlice {
            label: "Failed".to_string(),
            count: stats.failed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, duration: f64, status: TestStatus) -> TestCaseRecord {
        TestCaseRecord {
            name: name.to_string(),
            classname: "suite".to_string(),
            duration,
            status,
        }
    }

    #[test]
    fn test_duration_series_preserves_order() {
        let cases = vec![
            case("a", 0.5, TestStatus::Passed),
            case("b", 1.2, TestStatus::Failed),
            case("d", 0.1, TestStatus::Passed),
        ];

        let series = duration_series(&cases);

        let names: Vec<_> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "d"]);
        assert_eq!(series[1].status, TestStatus::Failed);
        assert_eq!(series[1].duration, 1.2);
    }

    #[test]
    fn test_series_point_serializes_time_field() {
        let series = duration_series(&[case("a", 0.5, TestStatus::Passed)]);
        let json = serde_json::to_value(&series[0]).unwrap();
        assert_eq!(json["time"], 0.5);
        assert_eq!(json["status"], "PASSED");
    }

    #[test]
    fn test_pie_slices() {
        let stats = SummaryStats {
            passed: 2,
            failed: 1,
            durations: None,
        };

        let slices = pie_slices(&stats);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Passed");
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[1].label, "Failed");
        assert_eq!(slices[1].count, 1);
    }

    #[test]
    fn test_pie_slices_empty_selection() {
        let slices = pie_slices(&SummaryStats::default());
        assert_eq!(slices[0].count, 0);
        assert_eq!(slices[1].count, 0);
    }
}
