//! # ensaio
//!
//! Wait-guarded browser UI interaction helpers and a scenario runner with
//! guaranteed session teardown.
//!
//! The crate wraps three primitive actions — click-when-clickable,
//! fill-when-visible, and select-from-popup-menu — each guarded by a single
//! bounded wait, and a [`ScenarioRunner`] that sequences a fixed list of
//! steps, captures a diagnostic screenshot on failure, and closes the
//! session exactly once on every exit path.
//!
//! ## Example
//!
//! ```no_run
//! use ensaio::{Locator, RunnerConfig, Scenario, ScenarioRunner};
//!
//! # #[cfg(feature = "browser")]
//! # async fn demo() -> ensaio::EnsaioResult<()> {
//! let scenario = Scenario::builder("login", "http://localhost:3000")
//!     .fill(Locator::id("username"), "tainara.daroca")
//!     .fill(Locator::id("password"), "daroca123456")
//!     .click(Locator::xpath("//form//button[@type='submit']"))
//!     .expect_text(Locator::css("[role='alert']"), "Bem-vindo");
//!
//! let session = ensaio::CdpSession::launch(&ensaio::SessionConfig::default()).await?;
//! let outcome = ScenarioRunner::with_config(RunnerConfig::default())
//!     .run(&scenario, session)
//!     .await;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod interact;
pub mod locator;
pub mod result;
pub mod runner;
pub mod scenario;
pub mod session;

#[cfg(feature = "browser")]
pub mod cdp;

pub use interact::{
    click_when_ready, fill_when_visible, select_from_popup_menu, wait_for_text,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use locator::{Locator, Selector};
pub use result::{EnsaioError, EnsaioResult};
pub use runner::{Outcome, RunState, RunnerConfig, ScenarioRunner};
pub use scenario::{Action, Scenario, ScenarioBuilder, Step, SuccessAssertion};
pub use session::{ElementState, FakeElement, FakeSession, Session, SessionConfig};

#[cfg(feature = "browser")]
pub use cdp::CdpSession;
