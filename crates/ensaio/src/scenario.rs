//! Scenario model: an ordered script of UI actions plus a terminal success
//! assertion.
//!
//! Steps are immutable data, executed strictly in sequence with no branching.
//! A scenario owns no session resources; it borrows the active session for
//! the duration of one run.

use crate::locator::Locator;
use serde::{Deserialize, Serialize};

/// One UI action kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Click an element once it is clickable
    Click {
        /// Target element
        locator: Locator,
    },
    /// Fill an element with text once it is visible
    Fill {
        /// Target element
        locator: Locator,
        /// Literal text, delivered as discrete keystrokes
        text: String,
    },
    /// Open a disclosure widget and click one of its options
    Select {
        /// Element that opens the popup
        trigger: Locator,
        /// Option inside the rendered popup
        option: Locator,
    },
}

/// An immutable, ordered step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The action to perform
    pub action: Action,
    /// Optional progress narration, logged before the step runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Step {
    /// Create a click step
    #[must_use]
    pub const fn click(locator: Locator) -> Self {
        Self {
            action: Action::Click { locator },
            note: None,
        }
    }

    /// Create a fill step
    #[must_use]
    pub fn fill(locator: Locator, text: impl Into<String>) -> Self {
        Self {
            action: Action::Fill {
                locator,
                text: text.into(),
            },
            note: None,
        }
    }

    /// Create a popup-select step
    #[must_use]
    pub const fn select(trigger: Locator, option: Locator) -> Self {
        Self {
            action: Action::Select { trigger, option },
            note: None,
        }
    }

    /// Attach a narration note
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Short description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.action {
            Action::Click { locator } => format!("click {locator}"),
            Action::Fill { locator, text } => {
                format!("fill {locator} ({} chars)", text.chars().count())
            }
            Action::Select { trigger, option } => format!("select {option} via {trigger}"),
        }
    }
}

/// Terminal predicate: an element whose text must contain the expected string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessAssertion {
    /// Element to watch
    pub locator: Locator,
    /// Text that must appear in its content
    pub expected_text: String,
}

/// An ordered sequence of steps plus a final success assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    name: String,
    url: String,
    steps: Vec<Step>,
    success: SuccessAssertion,
}

impl Scenario {
    /// Start building a scenario
    #[must_use]
    pub fn builder(name: impl Into<String>, url: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder {
            name: name.into(),
            url: url.into(),
            steps: Vec::new(),
        }
    }

    /// Scenario name (used for logs and artifact file names)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start URL, navigated to before the first step
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The ordered steps
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The terminal success assertion
    #[must_use]
    pub const fn success(&self) -> &SuccessAssertion {
        &self.success
    }
}

/// Fluent builder for [`Scenario`].
///
/// The terminal [`expect_text`](ScenarioBuilder::expect_text) call supplies
/// the success assertion, so a scenario without one cannot be constructed.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    name: String,
    url: String,
    steps: Vec<Step>,
}

impl ScenarioBuilder {
    /// Append a click step
    #[must_use]
    pub fn click(mut self, locator: Locator) -> Self {
        self.steps.push(Step::click(locator));
        self
    }

    /// Append a fill step
    #[must_use]
    pub fn fill(mut self, locator: Locator, text: impl Into<String>) -> Self {
        self.steps.push(Step::fill(locator, text));
        self
    }

    /// Append a popup-select step
    #[must_use]
    pub fn select(mut self, trigger: Locator, option: Locator) -> Self {
        self.steps.push(Step::select(trigger, option));
        self
    }

    /// Append a pre-built (e.g. annotated) step
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Finish with the success assertion: `locator`'s text must come to
    /// contain `expected_text`.
    #[must_use]
    pub fn expect_text(self, locator: Locator, expected_text: impl Into<String>) -> Scenario {
        Scenario {
            name: self.name,
            url: self.url,
            steps: self.steps,
            success: SuccessAssertion {
                locator,
                expected_text: expected_text.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scenario {
        Scenario::builder("login", "http://localhost:3000")
            .step(Step::fill(Locator::id("username"), "tainara.daroca").note("Logging in..."))
            .fill(Locator::id("password"), "daroca123456")
            .click(Locator::xpath("//form//button[@type='submit']"))
            .expect_text(Locator::css("main"), "Dashboard")
    }

    #[test]
    fn test_builder_preserves_step_order() {
        let scenario = sample();
        assert_eq!(scenario.name(), "login");
        assert_eq!(scenario.url(), "http://localhost:3000");
        assert_eq!(scenario.steps().len(), 3);
        assert!(matches!(scenario.steps()[0].action, Action::Fill { .. }));
        assert!(matches!(scenario.steps()[2].action, Action::Click { .. }));
    }

    #[test]
    fn test_note_attaches_to_step() {
        let scenario = sample();
        assert_eq!(scenario.steps()[0].note.as_deref(), Some("Logging in..."));
        assert!(scenario.steps()[1].note.is_none());
    }

    #[test]
    fn test_success_assertion() {
        let scenario = sample();
        assert_eq!(scenario.success().expected_text, "Dashboard");
    }

    #[test]
    fn test_describe() {
        let step = Step::fill(Locator::id("password"), "daroca123456");
        let text = step.describe();
        // Never echo the literal value into logs
        assert!(!text.contains("daroca123456"));
        assert!(text.contains("12 chars"));

        let select = Step::select(Locator::css("#trigger"), Locator::css("#option"));
        assert!(select.describe().contains("via"));
    }

    #[test]
    fn test_scenario_serde_round_trip() {
        let scenario = sample();
        let json = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(scenario, back);
    }
}
