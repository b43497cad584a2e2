//! Console reporter with colored output

use crate::config::DEFAULT_TARGET;
use crate::{RunSummary, TargetReport};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Violations at or under this priority are displayed
    threshold: u8,
    quiet: bool,
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            quiet: false,
            verbose: false,
        }
    }

    /// Minimal output: diagnostics and errors only
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Repeat the source header for every violation
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report one target: header per distinct source, `[L:C] message` for
    /// each violation at or under the threshold, then the pass/fail line.
    pub fn report(&self, report: &TargetReport) {
        if !self.quiet && report.name != DEFAULT_TARGET {
            println!(
                "{}",
                format!("Target: {} ({})", report.name, report.source.display()).bold()
            );
        }

        if let Some(ref dest) = report.report_path {
            if !self.quiet {
                println!("{}: Report created: \"{}\"", "OK".green(), dest.display());
            }
        }

        let mut last_label: Option<String> = None;
        for violation in &report.violations {
            let label = violation.source_label();
            let label_changed = last_label.as_deref() != Some(label.as_str());
            if (self.verbose || label_changed) && !label.is_empty() && !self.quiet {
                println!("Linting {} ...", label);
            }
            last_label = Some(label);

            if violation.priority <= self.threshold {
                let pos = format!(
                    "{}{}{}{}{}",
                    "[".red(),
                    format!("L{}", violation.begin_line).yellow(),
                    ":".red(),
                    format!("C{}", violation.begin_column).yellow(),
                    "]".red()
                );
                println!("{} {}", pos, violation.message.yellow());
            }
        }

        if report.violations.is_empty() {
            if !self.quiet {
                println!(
                    "{}: No violations detected in the FlexPMD report",
                    "OK".green()
                );
            }
        } else {
            eprintln!(
                "{}: Detected {} violations in the FlexPMD report!",
                "Error".red().bold(),
                report.violations.len()
            );
            if report.forced {
                println!("Used `force`, continuing anyway...");
            }
        }
    }

    /// Report every target, then an aggregate line when there are several.
    pub fn report_summary(&self, summary: &RunSummary) {
        for report in &summary.targets {
            self.report(report);
        }
        if !self.quiet && summary.targets.len() > 1 {
            println!();
            println!("{}", "═".repeat(60));
            println!(
                "   Targets: {}   Violations: {} ({} at or under threshold {})",
                summary.targets.len(),
                summary.total_violations,
                summary.total_reported,
                self.threshold
            );
        }
    }
}
