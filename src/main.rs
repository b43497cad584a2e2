//! Flexlint: FlexPMD lint runner CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use flexlint::analyzer::{self, RunOptions};
use flexlint::config::{load_config, CliOverrides, CONFIG_FILENAME};
use flexlint::reporter::{ConsoleReporter, JsonReporter};
use flexlint::LintError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Flexlint: lint Adobe Flex/ActionScript/MXML sources with FlexPMD
#[derive(Parser, Debug)]
#[command(name = "flexlint")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source directories to analyze (at most one may exist; omit to use the
    /// configured input or the current directory)
    src: Vec<PathBuf>,

    /// Fallback source directory when none are given
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Copy the XML report to this file or directory
    #[arg(long, short)]
    output: Option<String>,

    /// Custom ruleset file (glob)
    #[arg(long, short)]
    ruleset: Option<String>,

    /// Priority threshold 1-5; out-of-range values clamp, non-numeric means 5
    #[arg(long, short)]
    priority: Option<String>,

    /// Continue despite violations
    #[arg(long, short)]
    force: bool,

    /// Output results as JSON
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (diagnostics and errors only)
    #[arg(long, short)]
    quiet: bool,

    /// Echo the analyzer's stdout/stderr
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .flexlintrc.json upward)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analyzer executable (default: java)
    #[arg(long)]
    java: Option<String>,

    /// Path to the FlexPMD jar (default: FLEXPMD_JAR environment variable)
    #[arg(long)]
    jar: Option<PathBuf>,

    /// Number of targets to analyze in parallel (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .flexlintrc.json with sensible defaults
    Init {
        /// Priority threshold (1-5)
        #[arg(long)]
        priority: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { priority, dir }) = args.command {
        return run_init(priority, dir.as_deref());
    }

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(CliOverrides {
        src: args.src.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        ruleset: args.ruleset.clone(),
        priority: args.priority.clone(),
        force: args.force,
        java: args.java.clone(),
        jar: args.jar.clone(),
    });

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let opts = RunOptions {
        threshold: config.priority(),
        force: config.force,
        quiet: args.quiet,
        verbose: args.verbose,
    };

    let summary = match analyzer::run_all(&config, &opts) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return Ok(ExitCode::from(2));
        }
    };

    if args.json {
        let reporter = JsonReporter::new().pretty();
        println!("{}", reporter.report_summary(&summary));
    } else {
        let mut reporter = ConsoleReporter::new(opts.threshold);
        if args.quiet {
            reporter = reporter.quiet();
        }
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report_summary(&summary);
    }

    if summary.failed() {
        if !args.quiet && !args.json {
            eprintln!(
                "{}: {}",
                "Failed".red().bold(),
                LintError::ViolationsDetected(summary.total_violations)
            );
        }
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}

fn run_init(priority: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let priority_value = priority.unwrap_or(5).clamp(1, 5);

    let json = format!(
        r#"{{
  "input": "src",
  "priority": {},
  "force": false,
  "heap": "-Xmx256m",
  "jar": "flexpmd/flex-pmd-command-line.jar"
}}
"#,
        priority_value
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with priority={}",
        "Done".green().bold(),
        config_path.display(),
        priority_value
    );
    Ok(ExitCode::SUCCESS)
}
