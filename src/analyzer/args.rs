//! Command-line assembly for the analyzer process.
//!
//! The argument vector is rebuilt from scratch on every invocation; nothing
//! is shared across targets.

use crate::config::{Config, CONFIG_FILENAME, JAR_ENV_VAR};
use crate::error::LintError;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Resolve a target's candidate source directories down to the single
/// directory handed to the analyzer. Non-directories are skipped with a
/// warning; more than one survivor is fatal; zero survivors fall back to the
/// configured input, else the current directory.
pub fn resolve_source(
    candidates: &[PathBuf],
    input: Option<&Path>,
    quiet: bool,
) -> Result<PathBuf, LintError> {
    let mut dirs: Vec<&PathBuf> = Vec::new();
    for candidate in candidates {
        if candidate.is_dir() {
            dirs.push(candidate);
        } else if !quiet {
            eprintln!(
                "{}: Source dir not found: \"{}\"",
                "Warning".yellow(),
                candidate.display()
            );
        }
    }

    if dirs.len() > 1 {
        return Err(LintError::Config(format!(
            "FlexPMD can only accept 1 input source directory but was provided with {}",
            dirs.len()
        )));
    }
    if let Some(dir) = dirs.first() {
        return Ok((*dir).clone());
    }
    match input {
        Some(input) if input.is_dir() => Ok(input.to_path_buf()),
        Some(input) => Err(LintError::Config(format!(
            "Source dir not found: \"{}\"",
            input.display()
        ))),
        None => Ok(PathBuf::from("./")),
    }
}

/// Expand the configured ruleset pattern to an existing file.
pub fn resolve_ruleset(pattern: &str) -> Result<PathBuf, LintError> {
    let first = glob::glob(pattern)
        .map_err(|e| {
            LintError::Config(format!("Invalid ruleset pattern \"{}\": {}", pattern, e))
        })?
        .filter_map(|entry| entry.ok())
        .next();
    match first {
        Some(path) if path.is_file() => Ok(path),
        Some(path) => Err(LintError::Config(format!(
            "Custom ruleset not found: \"{}\"",
            path.display()
        ))),
        None => Err(LintError::Config(format!(
            "Custom ruleset not found: \"{}\"",
            pattern
        ))),
    }
}

/// Build a fresh argument vector for one analyzer invocation:
/// `<heap> -jar <jar> [-r <ruleset>] -s <source> -o <out_dir>`.
pub fn assemble(
    config: &Config,
    source: &Path,
    ruleset: Option<&Path>,
    out_dir: &Path,
) -> Result<Vec<String>, LintError> {
    let jar = config.jar().ok_or_else(|| {
        LintError::Config(format!(
            "FlexPMD jar not configured; set \"jar\" in {} or the {} environment variable",
            CONFIG_FILENAME, JAR_ENV_VAR
        ))
    })?;

    let mut args = vec![
        config.heap().to_string(),
        "-jar".to_string(),
        jar.to_string_lossy().into_owned(),
    ];
    if let Some(ruleset) = ruleset {
        args.push("-r".to_string());
        args.push(ruleset.to_string_lossy().into_owned());
    }
    args.push("-s".to_string());
    args.push(source.to_string_lossy().into_owned());
    args.push("-o".to_string());
    args.push(out_dir.to_string_lossy().into_owned());
    Ok(args)
}
