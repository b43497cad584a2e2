//! Error kinds for the lint pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of a single target's pipeline. All are terminal for the
/// target: no retries, no partial recovery. The `force` option is the only
/// thing that downgrades `ViolationsDetected` to a logged warning.
#[derive(Debug, Error)]
pub enum LintError {
    /// Bad or missing configuration: multiple source dirs, missing ruleset
    /// file, unresolvable jar path.
    #[error("configuration error: {0}")]
    Config(String),

    /// The analyzer could not be spawned, exited non-zero, or signalled
    /// failure in its output streams.
    #[error("analyzer process failed: {0}")]
    Process(String),

    /// The analyzer exited cleanly but left no report behind.
    #[error("failed to create FlexPMD report: {} not found", .0.display())]
    ReportMissing(PathBuf),

    /// The report exists but is not well-formed XML.
    #[error("failed to parse FlexPMD report: {0}")]
    Parse(String),

    /// The report contained violations and `force` was not set.
    #[error("detected {0} violations in the FlexPMD report")]
    ViolationsDetected(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
