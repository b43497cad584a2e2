//! Config schema and CLI merging

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::priority::{self, DEFAULT_PRIORITY};

/// Default analyzer executable.
pub const DEFAULT_JAVA: &str = "java";

/// Default JVM heap flag handed to the analyzer.
pub const DEFAULT_HEAP: &str = "-Xmx256m";

/// Environment variable consulted when no jar path is configured.
pub const JAR_ENV_VAR: &str = "FLEXPMD_JAR";

/// Name of the implicit target built from top-level options or CLI paths.
pub const DEFAULT_TARGET: &str = "default";

/// A named file group: one analyzer run over one source directory.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Candidate source directories. Non-directories are skipped with a
    /// warning; more than one survivor is a configuration error.
    #[serde(default)]
    pub src: Vec<PathBuf>,
    /// Where to copy this target's XML report
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

/// Root config structure for .flexlintrc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Fallback source directory when a target lists none
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Destination for the XML report (glob, file, or directory)
    #[serde(default)]
    pub output: Option<String>,
    /// Custom ruleset path (glob-expanded; must resolve to an existing file)
    #[serde(default)]
    pub ruleset: Option<String>,
    /// Priority threshold, 1-5. Accepts a number or a string; normalized on
    /// read, so out-of-range values clamp and non-numeric values mean 5.
    #[serde(default)]
    priority: Option<serde_json::Value>,
    /// Continue despite violations
    #[serde(default)]
    pub force: bool,
    /// Analyzer executable (default "java")
    #[serde(default)]
    pub java: Option<String>,
    /// Path to the FlexPMD jar (falls back to the FLEXPMD_JAR env var)
    #[serde(default)]
    pub jar: Option<PathBuf>,
    /// JVM heap flag (default "-Xmx256m")
    #[serde(default)]
    pub heap: Option<String>,
    /// Named targets; when empty a single implicit target is built from the
    /// top-level options
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,
}

/// CLI flag values that override file config field by field.
#[derive(Debug, Default)]
pub struct CliOverrides {
    /// Positional source directories; non-empty replaces all named targets
    /// with a single implicit one
    pub src: Vec<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<String>,
    pub ruleset: Option<String>,
    pub priority: Option<String>,
    pub force: bool,
    pub java: Option<String>,
    pub jar: Option<PathBuf>,
}

impl Config {
    /// Effective threshold after normalization.
    pub fn priority(&self) -> u8 {
        match &self.priority {
            Some(serde_json::Value::Number(n)) => match n.as_i64() {
                Some(v) => priority::clamp(v),
                None => DEFAULT_PRIORITY,
            },
            Some(serde_json::Value::String(s)) => priority::normalize(Some(s.as_str())),
            _ => DEFAULT_PRIORITY,
        }
    }

    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if !cli.src.is_empty() {
            self.targets.clear();
            self.targets.insert(
                DEFAULT_TARGET.to_string(),
                Target {
                    src: cli.src,
                    dest: None,
                },
            );
        }
        if cli.input.is_some() {
            self.input = cli.input;
        }
        if cli.output.is_some() {
            self.output = cli.output;
        }
        if cli.ruleset.is_some() {
            self.ruleset = cli.ruleset;
        }
        if let Some(p) = cli.priority {
            self.priority = Some(serde_json::Value::String(p));
        }
        if cli.force {
            self.force = true;
        }
        if cli.java.is_some() {
            self.java = cli.java;
        }
        if cli.jar.is_some() {
            self.jar = cli.jar;
        }
        self
    }

    pub fn java(&self) -> &str {
        self.java.as_deref().unwrap_or(DEFAULT_JAVA)
    }

    pub fn heap(&self) -> &str {
        self.heap.as_deref().unwrap_or(DEFAULT_HEAP)
    }

    /// Jar path from config, or the FLEXPMD_JAR environment variable.
    pub fn jar(&self) -> Option<PathBuf> {
        self.jar
            .clone()
            .or_else(|| std::env::var_os(JAR_ENV_VAR).map(PathBuf::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults_when_absent() {
        let config = Config::default();
        assert_eq!(config.priority(), 5);
    }

    #[test]
    fn test_priority_from_number() {
        let config: Config = serde_json::from_str(r#"{ "priority": 2 }"#).unwrap();
        assert_eq!(config.priority(), 2);
    }

    #[test]
    fn test_priority_clamps_number() {
        let config: Config = serde_json::from_str(r#"{ "priority": 0 }"#).unwrap();
        assert_eq!(config.priority(), 1);
        let config: Config = serde_json::from_str(r#"{ "priority": 9 }"#).unwrap();
        assert_eq!(config.priority(), 5);
    }

    #[test]
    fn test_priority_from_string() {
        let config: Config = serde_json::from_str(r#"{ "priority": "3" }"#).unwrap();
        assert_eq!(config.priority(), 3);
    }

    #[test]
    fn test_priority_non_numeric_defaults() {
        let config: Config = serde_json::from_str(r#"{ "priority": "high" }"#).unwrap();
        assert_eq!(config.priority(), 5);
    }

    #[test]
    fn test_merge_with_cli_overrides() {
        let config: Config =
            serde_json::from_str(r#"{ "priority": 5, "ruleset": "base.xml" }"#).unwrap();
        let merged = config.merge_with_cli(CliOverrides {
            priority: Some("2".to_string()),
            ruleset: Some("custom.xml".to_string()),
            force: true,
            ..CliOverrides::default()
        });
        assert_eq!(merged.priority(), 2);
        assert_eq!(merged.ruleset.as_deref(), Some("custom.xml"));
        assert!(merged.force);
    }

    #[test]
    fn test_merge_cli_src_replaces_targets() {
        let config: Config = serde_json::from_str(
            r#"{ "targets": { "app": { "src": ["app/src"] }, "lib": { "src": ["lib/src"] } } }"#,
        )
        .unwrap();
        let merged = config.merge_with_cli(CliOverrides {
            src: vec![PathBuf::from("cli/src")],
            ..CliOverrides::default()
        });
        assert_eq!(merged.targets.len(), 1);
        assert_eq!(
            merged.targets[DEFAULT_TARGET].src,
            vec![PathBuf::from("cli/src")]
        );
    }

    #[test]
    fn test_targets_deserialization() {
        let config: Config = serde_json::from_str(
            r#"{ "targets": { "app": { "src": ["app/src"], "dest": "reports/app.xml" } } }"#,
        )
        .unwrap();
        let target = &config.targets["app"];
        assert_eq!(target.src, vec![PathBuf::from("app/src")]);
        assert_eq!(target.dest.as_deref(), Some(std::path::Path::new("reports/app.xml")));
    }

    #[test]
    fn test_java_and_heap_defaults() {
        let config = Config::default();
        assert_eq!(config.java(), "java");
        assert_eq!(config.heap(), "-Xmx256m");
    }
}
