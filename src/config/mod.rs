//! Configuration loading for flexlint

mod schema;

pub use schema::{
    CliOverrides, Config, Target, DEFAULT_HEAP, DEFAULT_JAVA, DEFAULT_TARGET, JAR_ENV_VAR,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".flexlintrc.json";

/// Find and load the config file. Searches the work directory then its
/// parents; an explicit path that does not exist is an error. No config file
/// anywhere yields the defaults.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for .flexlintrc.json in a directory and its parents.
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}
