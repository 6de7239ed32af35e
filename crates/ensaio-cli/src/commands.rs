//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ensaiador: run browser scenarios against the target application
#[derive(Parser, Debug)]
#[command(name = "ensaiar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scenario by name
    Run(RunArgs),

    /// List the registered scenarios
    List,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario name (see `ensaiar list`)
    pub name: String,

    /// Frontend base URL
    #[arg(long, env = "ENSAIO_URL", default_value = "http://localhost:3000")]
    pub url: String,

    /// Login username
    #[arg(long, env = "ENSAIO_USERNAME")]
    pub username: String,

    /// Login password
    #[arg(long, env = "ENSAIO_PASSWORD")]
    pub password: String,

    /// Show the browser window instead of running headless
    #[arg(long, env = "ENSAIO_HEADED")]
    pub headed: bool,

    /// Per-step wait budget in milliseconds
    #[arg(long, env = "ENSAIO_TIMEOUT_MS", default_value = "10000")]
    pub timeout_ms: u64,

    /// Directory for failure screenshots
    #[arg(long, env = "ENSAIO_ARTIFACT_DIR", default_value = ".")]
    pub artifact_dir: PathBuf,

    /// Path to a chromium binary (defaults to autodetection)
    #[arg(long, env = "CHROMIUM_PATH")]
    pub chromium_path: Option<String>,
}
