//! Ensaiador: command-line front end for the `ensaio` scenario runner.
//!
//! ```bash
//! ensaiar list
//! ensaiar run register-client --username tainara.daroca --password '...'
//! ensaiar run report-generation --headed --artifact-dir ./artifacts
//! ```

pub mod commands;
pub mod error;
pub mod scenarios;

pub use commands::{Cli, Commands, RunArgs};
pub use error::{CliError, CliResult};
pub use scenarios::{by_name, register_client, report_generation, Target, SCENARIO_NAMES};
