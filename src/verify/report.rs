//! Verification results and their rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which verification produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Substring presence.
    Contains,
    /// Non-zero size.
    NonEmpty,
}

impl Operation {
    /// Short name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NonEmpty => "non-empty",
        }
    }
}

/// Outcome of one check on one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Logical path that was checked, including any executable suffix.
    pub path: String,
    /// The check performed.
    pub operation: Operation,
    /// Whether the check passed.
    pub passed: bool,
    /// Failure message; empty on success.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

/// Aggregated results of verifying an expectation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// When verification ran.
    pub checked_at: DateTime<Utc>,
    /// Per-check results, in declaration order.
    pub results: Vec<CheckResult>,
}

impl VerificationReport {
    /// Returns `true` if every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Returns only the checks that failed.
    #[must_use]
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Formats a report as human-readable text.
#[must_use]
pub fn format_report(report: &VerificationReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Checked at: {}", report.checked_at.to_rfc3339()));
    lines.push(String::new());
    for result in &report.results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        lines.push(format!("  [{status}] {} {}", result.operation.name(), result.path));
        if !result.passed {
            for detail_line in result.detail.lines() {
                lines.push(format!("         {detail_line}"));
            }
        }
    }
    lines.push(String::new());
    let failed = report.failures().len();
    let overall = if failed == 0 {
        "PASSED".to_string()
    } else {
        format!("FAILED ({failed} of {})", report.results.len())
    };
    lines.push(format!("Result: {overall}"));
    lines.join("\n")
}
