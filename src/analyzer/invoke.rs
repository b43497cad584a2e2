//! Spawn the analyzer and scan its output for failure markers.

use crate::error::LintError;
use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;

/// Captured output of one analyzer run.
#[derive(Debug)]
pub struct AnalyzerOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run the analyzer to completion, capturing both streams. Spawn failure and
/// non-zero exit are fatal, as is failure text in either stream.
pub fn run(java: &str, args: &[String]) -> Result<AnalyzerOutput, LintError> {
    let output = Command::new(java)
        .args(args)
        .output()
        .map_err(|e| LintError::Process(format!("failed to run {}: {}", java, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(LintError::Process(format!(
            "{} exited with {}: {}",
            java,
            output.status,
            stderr.trim()
        )));
    }

    // FlexPMD's own failure signalling is unreliable; scan both streams for
    // its failure text even on a zero exit. The match is deliberately
    // literal, so "0 errors found" also trips it.
    if contains_failure_text(&stdout) {
        return Err(LintError::Process(
            "failures or errors were detected in FlexPMD stdout".to_string(),
        ));
    }
    if contains_failure_text(&stderr) {
        return Err(LintError::Process(
            "failures or errors were detected in FlexPMD stderr".to_string(),
        ));
    }

    Ok(AnalyzerOutput { stdout, stderr })
}

/// Case-insensitive scan for the analyzer's failure markers.
pub fn contains_failure_text(s: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new("fail|error").expect("static pattern"));
    re.is_match(&s.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_text_case_insensitive() {
        assert!(contains_failure_text("ERROR: something broke"));
        assert!(contains_failure_text("one test Failed"));
        assert!(contains_failure_text("fail"));
    }

    #[test]
    fn test_failure_text_matches_substrings() {
        // Literal scan: "0 errors found" trips it on purpose
        assert!(contains_failure_text("0 errors found"));
        assert!(contains_failure_text("failsafe enabled"));
    }

    #[test]
    fn test_failure_text_clean_output() {
        assert!(!contains_failure_text("FlexPMD finished in 2.3s"));
        assert!(!contains_failure_text(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_output() {
        let out = run("sh", &["-c".to_string(), "echo analysis complete".to_string()]).unwrap();
        assert!(out.stdout.contains("analysis complete"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_zero_exit_with_error_text_fails() {
        let err = run("sh", &["-c".to_string(), "echo ERROR detected".to_string()]).unwrap_err();
        assert!(err.to_string().contains("stdout"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_stderr_error_text_fails() {
        let err = run(
            "sh",
            &["-c".to_string(), "echo failure >&2".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("stderr"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_non_zero_exit_fails() {
        let err = run("sh", &["-c".to_string(), "exit 3".to_string()]).unwrap_err();
        assert!(matches!(err, LintError::Process(_)));
    }

    #[test]
    fn test_run_spawn_failure() {
        let err = run("/no/such/binary", &[]).unwrap_err();
        assert!(matches!(err, LintError::Process(_)));
    }
}
