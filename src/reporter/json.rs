//! JSON reporter for machine-readable output

use crate::{RunSummary, TargetReport};

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single target as JSON
    pub fn report(&self, report: &TargetReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Report the whole run with aggregate totals
    pub fn report_summary(&self, summary: &RunSummary) -> String {
        if self.pretty {
            serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Violation;
    use std::path::PathBuf;

    fn sample_summary() -> RunSummary {
        RunSummary::from_targets(vec![TargetReport {
            name: "default".to_string(),
            source: PathBuf::from("src"),
            violations: vec![Violation {
                package: Some("com.example".to_string()),
                class: Some("Foo".to_string()),
                priority: 1,
                begin_line: 10,
                begin_column: 5,
                message: "Method is too long".to_string(),
            }],
            reported: 1,
            forced: false,
            report_path: None,
        }])
    }

    #[test]
    fn test_summary_is_valid_json() {
        let out = JsonReporter::new().report_summary(&sample_summary());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["totalViolations"], 1);
        assert_eq!(parsed["targets"][0]["violations"][0]["beginLine"], 10);
    }

    #[test]
    fn test_pretty_output_multiline() {
        let out = JsonReporter::new().pretty().report_summary(&sample_summary());
        assert!(out.contains('\n'));
    }
}
