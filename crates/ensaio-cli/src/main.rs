//! Ensaiar: run browser scenarios from the command line
//!
//! ## Usage
//!
//! ```bash
//! ensaiar list
//! ensaiar run register-client --username tainara.daroca --password '...'
//! ```

use clap::Parser;
use ensaiador::{scenarios, Cli, CliError, CliResult, Commands, RunArgs};
use ensaio::{CdpSession, Outcome, RunnerConfig, ScenarioRunner, SessionConfig};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(outcome) => {
            println!("{outcome}");
            if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CliResult<Outcome> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for name in scenarios::SCENARIO_NAMES {
                println!("{name}");
            }
            Ok(Outcome::Success)
        }
        Commands::Run(args) => run_scenario(args).await,
    }
}

async fn run_scenario(args: RunArgs) -> CliResult<Outcome> {
    let target = scenarios::Target {
        base_url: args.url.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
    };
    let scenario =
        scenarios::by_name(&args.name, &target).ok_or_else(|| CliError::UnknownScenario {
            name: args.name.clone(),
        })?;

    let mut session_config = SessionConfig::default().with_headless(!args.headed);
    if let Some(path) = args.chromium_path {
        session_config = session_config.with_chromium_path(path);
    }

    info!(scenario = %scenario.name(), url = %args.url, "launching browser");
    let session = CdpSession::launch(&session_config).await?;

    let runner_config = RunnerConfig::default()
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .with_artifact_dir(args.artifact_dir);

    let outcome = ScenarioRunner::with_config(runner_config)
        .run(&scenario, session)
        .await;
    Ok(outcome)
}
