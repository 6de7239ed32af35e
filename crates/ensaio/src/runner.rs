//! Scenario runner: owns the session lifecycle and executes a scenario to a
//! terminal outcome.
//!
//! Teardown is unconditional. The runner takes the session by value, drives
//! the steps, and closes the session exactly once on every exit path —
//! success, timeout, or unexpected failure. On failure it first captures a
//! diagnostic screenshot under a failure-kind-specific name.

use crate::interact;
use crate::result::{EnsaioError, EnsaioResult};
use crate::scenario::{Action, Scenario};
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Terminal result of one scenario run
#[derive(Debug)]
pub enum Outcome {
    /// All steps ran and the success assertion held
    Success,
    /// A wait expired. `step` is the index of the step that timed out; an
    /// index equal to `scenario.steps().len()` denotes the success assertion.
    TimedOut {
        /// Index of the timed-out step
        step: usize,
    },
    /// Any other fault: a driver error, a click on a vanished element, ...
    UnexpectedFailure {
        /// The underlying error
        cause: EnsaioError,
    },
}

impl Outcome {
    /// Whether the run succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TimedOut { step } => write!(f, "timed out at step {step}"),
            Self::UnexpectedFailure { cause } => write!(f, "unexpected failure: {cause}"),
        }
    }
}

/// Execution states of one run.
///
/// `Init -> Running(step) -> {Succeeded | TimedOut | Failed} -> TornDown`,
/// no retries, no re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Session acquired, nothing executed yet
    Init,
    /// Executing the step at this index (steps.len() = the success assertion)
    Running(usize),
    /// Terminal: assertion held
    Succeeded,
    /// Terminal: a wait expired
    TimedOut,
    /// Terminal: unexpected fault
    Failed,
    /// Session has been closed
    TornDown,
}

impl RunState {
    /// Whether this state is terminal (pre-teardown)
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::TimedOut | Self::Failed)
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Timeout applied to each step's wait
    pub step_timeout: Duration,
    /// Timeout applied to the success assertion's wait
    pub assertion_timeout: Duration,
    /// Directory for failure screenshots
    pub artifact_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_millis(interact::DEFAULT_TIMEOUT_MS),
            assertion_timeout: Duration::from_millis(interact::DEFAULT_TIMEOUT_MS),
            artifact_dir: PathBuf::from("."),
        }
    }
}

impl RunnerConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-step timeout
    #[must_use]
    pub const fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Set the assertion timeout
    #[must_use]
    pub const fn with_assertion_timeout(mut self, timeout: Duration) -> Self {
        self.assertion_timeout = timeout;
        self
    }

    /// Set one timeout for both steps and the assertion
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self.assertion_timeout = timeout;
        self
    }

    /// Set the screenshot directory
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }
}

/// Executes scenarios against an exclusively-owned session.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    /// Create a runner with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with the given configuration
    #[must_use]
    pub const fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the scenario to a terminal outcome.
    ///
    /// Takes the session by value: the runner is its sole owner from here on
    /// and closes it exactly once, whatever happens. A timeout or fault
    /// aborts the remaining steps immediately — no partial continuation.
    pub async fn run<S: Session>(&self, scenario: &Scenario, mut session: S) -> Outcome {
        let mut state = RunState::Init;
        info!(scenario = scenario.name(), "starting scenario");

        let result = self.drive(scenario, &mut session, &mut state).await;

        let outcome = match result {
            Ok(()) => {
                state = RunState::Succeeded;
                info!(scenario = scenario.name(), "scenario succeeded");
                Outcome::Success
            }
            Err(cause) if cause.is_timeout() => {
                let step = match state {
                    RunState::Running(index) => index,
                    _ => 0,
                };
                error!(scenario = scenario.name(), step, %cause, "wait expired");
                self.capture(&session, scenario, "timeout").await;
                state = RunState::TimedOut;
                Outcome::TimedOut { step }
            }
            Err(cause) => {
                error!(scenario = scenario.name(), %cause, "unexpected failure");
                self.capture(&session, scenario, "unexpected").await;
                state = RunState::Failed;
                Outcome::UnexpectedFailure { cause }
            }
        };

        debug_assert!(state.is_terminal());
        if let Err(err) = session.close().await {
            // Teardown faults are reported but never mask the outcome
            warn!(%err, "session close failed");
        }
        state = RunState::TornDown;
        debug!(scenario = scenario.name(), ?state, "session torn down");
        outcome
    }

    async fn drive<S: Session>(
        &self,
        scenario: &Scenario,
        session: &mut S,
        state: &mut RunState,
    ) -> EnsaioResult<()> {
        session.navigate(scenario.url()).await?;
        info!(url = scenario.url(), "page loaded");

        for (index, step) in scenario.steps().iter().enumerate() {
            *state = RunState::Running(index);
            if let Some(note) = &step.note {
                info!("{note}");
            }
            debug!(index, step = %step.describe(), "executing step");
            match &step.action {
                Action::Click { locator } => {
                    interact::click_when_ready(session, locator, self.config.step_timeout).await?;
                }
                Action::Fill { locator, text } => {
                    interact::fill_when_visible(session, locator, text, self.config.step_timeout)
                        .await?;
                }
                Action::Select { trigger, option } => {
                    interact::select_from_popup_menu(
                        session,
                        trigger,
                        option,
                        self.config.step_timeout,
                    )
                    .await?;
                }
            }
        }

        // The assertion gets its own bounded wait, indexed past the last step
        *state = RunState::Running(scenario.steps().len());
        let assertion = scenario.success();
        info!(expected = assertion.expected_text, "awaiting confirmation");
        interact::wait_for_text(
            session,
            &assertion.locator,
            &assertion.expected_text,
            self.config.assertion_timeout,
        )
        .await
    }

    /// Best-effort diagnostic capture; failures are logged, never propagated.
    async fn capture<S: Session>(&self, session: &S, scenario: &Scenario, kind: &str) {
        match session.screenshot().await {
            Ok(png) => {
                let path = self.artifact_path(scenario.name(), kind);
                match std::fs::write(&path, &png) {
                    Ok(()) => info!(path = %path.display(), "failure screenshot saved"),
                    Err(err) => warn!(%err, "could not write failure screenshot"),
                }
            }
            Err(err) => warn!(%err, "could not capture failure screenshot"),
        }
    }

    fn artifact_path(&self, scenario: &str, kind: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Path::new(&self.config.artifact_dir).join(format!("{scenario}_{kind}_{stamp}.png"))
    }
}
