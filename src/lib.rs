//! Flexlint: lint runner for FlexPMD
//!
//! Drives the FlexPMD analyzer jar against one or more source directories,
//! parses the XML report it produces, filters violations by priority
//! threshold, and turns the result into a pass/fail status.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod priority;
pub mod report;
pub mod reporter;

pub use error::LintError;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rule infraction from the FlexPMD XML report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Package of the offending source, when reported
    pub package: Option<String>,
    /// Class of the offending source, when reported
    pub class: Option<String>,
    /// Severity rank, 1 (most severe) to 5 (least severe)
    pub priority: u8,
    /// 1-indexed line; 0 when the report gave a negative or missing value
    pub begin_line: u32,
    /// 1-indexed column; 0 when the report gave a negative or missing value
    pub begin_column: u32,
    /// Violation message text
    pub message: String,
}

impl Violation {
    /// Human-readable location label: the class (package-qualified when
    /// both are present), else the package, else empty.
    pub fn source_label(&self) -> String {
        match (&self.class, &self.package) {
            (Some(class), Some(pkg)) => format!("class \"{}.{}\"", pkg, class),
            (Some(class), None) => format!("class \"{}\"", class),
            (None, Some(pkg)) => format!("package \"{}\"", pkg),
            (None, None) => String::new(),
        }
    }
}

/// Outcome of one target's pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReport {
    /// Target name from the config, or the implicit default
    pub name: String,
    /// Resolved source directory handed to the analyzer
    pub source: PathBuf,
    /// Every violation in the report, regardless of threshold
    pub violations: Vec<Violation>,
    /// Count of violations at or under the threshold (the ones displayed)
    pub reported: usize,
    /// Whether `force` downgraded a failure to a warning
    pub forced: bool,
    /// Where the report was copied, when a destination was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl TargetReport {
    /// A target fails when the report contains any violations at all,
    /// regardless of threshold, unless `force` was set.
    pub fn failed(&self) -> bool {
        !self.violations.is_empty() && !self.forced
    }

    /// Terminal status as a result, for callers that want the error kind.
    pub fn into_result(self) -> Result<TargetReport, LintError> {
        if self.failed() {
            Err(LintError::ViolationsDetected(self.violations.len()))
        } else {
            Ok(self)
        }
    }
}

/// Aggregate outcome across all targets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Per-target reports, in target order
    pub targets: Vec<TargetReport>,
    /// Violations across all targets, regardless of threshold
    pub total_violations: usize,
    /// Violations at or under the threshold across all targets
    pub total_reported: usize,
}

impl RunSummary {
    pub fn from_targets(targets: Vec<TargetReport>) -> Self {
        let total_violations = targets.iter().map(|t| t.violations.len()).sum();
        let total_reported = targets.iter().map(|t| t.reported).sum();
        Self {
            targets,
            total_violations,
            total_reported,
        }
    }

    /// True when any target failed.
    pub fn failed(&self) -> bool {
        self.targets.iter().any(TargetReport::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(package: Option<&str>, class: Option<&str>) -> Violation {
        Violation {
            package: package.map(String::from),
            class: class.map(String::from),
            priority: 3,
            begin_line: 1,
            begin_column: 1,
            message: "msg".to_string(),
        }
    }

    #[test]
    fn test_source_label_class_with_package() {
        let v = violation(Some("com.example"), Some("Foo"));
        assert_eq!(v.source_label(), "class \"com.example.Foo\"");
    }

    #[test]
    fn test_source_label_class_only() {
        let v = violation(None, Some("Foo"));
        assert_eq!(v.source_label(), "class \"Foo\"");
    }

    #[test]
    fn test_source_label_package_only() {
        let v = violation(Some("com.example"), None);
        assert_eq!(v.source_label(), "package \"com.example\"");
    }

    #[test]
    fn test_source_label_empty() {
        let v = violation(None, None);
        assert_eq!(v.source_label(), "");
    }

    #[test]
    fn test_target_report_failed_with_violations() {
        let report = TargetReport {
            name: "default".to_string(),
            source: PathBuf::from("src"),
            violations: vec![violation(None, Some("Foo"))],
            reported: 0,
            forced: false,
            report_path: None,
        };
        // Violations above the threshold still fail the target
        assert!(report.failed());
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_target_report_forced_passes() {
        let report = TargetReport {
            name: "default".to_string(),
            source: PathBuf::from("src"),
            violations: vec![violation(None, Some("Foo"))],
            reported: 1,
            forced: true,
            report_path: None,
        };
        assert!(!report.failed());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_run_summary_totals() {
        let make = |count: usize, reported: usize| TargetReport {
            name: "t".to_string(),
            source: PathBuf::from("src"),
            violations: (0..count).map(|_| violation(None, None)).collect(),
            reported,
            forced: false,
            report_path: None,
        };
        let summary = RunSummary::from_targets(vec![make(3, 2), make(0, 0)]);
        assert_eq!(summary.total_violations, 3);
        assert_eq!(summary.total_reported, 2);
        assert!(summary.failed());
    }

    #[test]
    fn test_run_summary_clean() {
        let summary = RunSummary::from_targets(vec![]);
        assert_eq!(summary.total_violations, 0);
        assert!(!summary.failed());
    }
}
