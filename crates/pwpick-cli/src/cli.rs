use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pwpick")]
#[command(bin_name = "pwpick")]
#[command(version)]
#[command(about = "Interactive multi-list picker for running Playwright tests")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project(s) to list and run tests for (repeatable)
    #[arg(long = "project", value_name = "NAME")]
    pub projects: Vec<String>,

    /// Only list tests matching this pattern
    #[arg(short = 'g', long = "grep", value_name = "PATTERN")]
    pub grep: Option<String>,

    /// Exclude tests matching this pattern from the listing
    #[arg(long = "grep-invert", value_name = "PATTERN")]
    pub grep_invert: Option<String>,

    /// Path to the Playwright config file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Load the listing from a pre-captured JSON file instead of the runner
    #[arg(long = "json-data-path", value_name = "PATH")]
    pub json_data_path: Option<PathBuf>,

    /// Only list tests related to changed files
    #[arg(long)]
    pub only_changed: bool,

    /// Only list tests that failed in the last run
    #[arg(long)]
    pub last_failed: bool,

    /// Write a diagnostics log for this session
    #[arg(long)]
    pub diagnostics: bool,

    /// Arguments after `--` are passed through to `playwright test` verbatim
    #[arg(last = true, value_name = "RUNNER_ARGS")]
    pub runner_args: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run environment and configuration checks")]
    Doctor,
}
