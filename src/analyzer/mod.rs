//! Per-target pipeline and parallel fan-out.
//!
//! Each target runs strictly sequentially: resolve sources, assemble
//! arguments, spawn the analyzer, locate and parse the report, filter by
//! threshold. Targets fan out in parallel and the first error wins.

pub mod args;
pub mod invoke;

use crate::config::{Config, Target, DEFAULT_TARGET};
use crate::error::LintError;
use crate::report;
use crate::{RunSummary, TargetReport};
use rayon::prelude::*;
use std::path::PathBuf;

/// Options resolved once per run and shared read-only across targets.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Violations at or under this priority are reported
    pub threshold: u8,
    /// Succeed despite violations
    pub force: bool,
    pub quiet: bool,
    /// Echo the analyzer's captured stdout/stderr
    pub verbose: bool,
}

/// Run one target's pipeline to completion.
pub fn run_target(
    config: &Config,
    name: &str,
    target: &Target,
    opts: &RunOptions,
) -> Result<TargetReport, LintError> {
    let source = args::resolve_source(&target.src, config.input.as_deref(), opts.quiet)?;

    let ruleset = match config.ruleset.as_deref() {
        Some(pattern) => Some(args::resolve_ruleset(pattern)?),
        None => None,
    };

    // Fresh output directory per invocation; dropped (and removed
    // best-effort) on every terminal path.
    let out_dir = tempfile::Builder::new().prefix("flexlint").tempdir()?;

    let argv = args::assemble(config, &source, ruleset.as_deref(), out_dir.path())?;
    let output = invoke::run(config.java(), &argv)?;

    if opts.verbose {
        if !output.stdout.is_empty() {
            eprint!("{}", output.stdout);
        }
        if !output.stderr.is_empty() {
            eprint!("{}", output.stderr);
        }
    }

    let report_file = report::locate(out_dir.path())?;

    let dest = target
        .dest
        .clone()
        .or_else(|| expand_output(config.output.as_deref()));
    let report_path = match dest {
        Some(dest) => Some(report::copy_to_destination(&report_file, &dest)?),
        None => None,
    };

    let xml = std::fs::read_to_string(&report_file)?;
    let violations = report::parse(&xml)?;
    let reported = violations
        .iter()
        .filter(|v| v.priority <= opts.threshold)
        .count();

    Ok(TargetReport {
        name: name.to_string(),
        source,
        violations,
        reported,
        forced: opts.force,
        report_path,
    })
}

/// Expand the configured output pattern; falls back to the literal path when
/// the glob matches nothing (the destination may not exist yet).
fn expand_output(pattern: Option<&str>) -> Option<PathBuf> {
    let pattern = pattern?;
    let matched = glob::glob(pattern)
        .ok()
        .and_then(|mut entries| entries.find_map(|e| e.ok()));
    Some(matched.unwrap_or_else(|| PathBuf::from(pattern)))
}

/// Fan out over every configured target, joining on all of them and
/// surfacing the first error.
pub fn run_all(config: &Config, opts: &RunOptions) -> Result<RunSummary, LintError> {
    let targets = effective_targets(config);
    let results: Vec<Result<TargetReport, LintError>> = targets
        .par_iter()
        .map(|(name, target)| run_target(config, name, target, opts))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        reports.push(result?);
    }
    Ok(RunSummary::from_targets(reports))
}

/// Named targets from the config, or a single implicit one built from the
/// top-level options.
fn effective_targets(config: &Config) -> Vec<(String, Target)> {
    if config.targets.is_empty() {
        vec![(DEFAULT_TARGET.to_string(), Target::default())]
    } else {
        config
            .targets
            .iter()
            .map(|(name, target)| (name.clone(), target.clone()))
            .collect()
    }
}
