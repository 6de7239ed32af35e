//! Session boundary: the capability set consumed from the browser-automation
//! collaborator.
//!
//! A [`Session`] is the live handle to one browser under automated control.
//! It is explicitly constructed and explicitly passed — there is no
//! process-global driver. The scenario runner takes the session by value,
//! which makes exclusive ownership structural rather than lock-enforced, and
//! closes it exactly once on every exit path.

use crate::locator::Locator;
use crate::result::{EnsaioError, EnsaioResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Observed state of a located element at probe time.
///
/// Resolution happens against the live DOM every poll; this snapshot is never
/// cached beyond one wait iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Element is rendered and takes up layout space
    pub visible: bool,
    /// Element is not disabled
    pub enabled: bool,
}

impl ElementState {
    /// Whether the element can receive a click right now
    #[must_use]
    pub const fn interactable(self) -> bool {
        self.visible && self.enabled
    }
}

/// Capability set over a live browser session.
///
/// The interaction helpers in [`crate::interact`] and the scenario runner are
/// written against this trait; `CdpSession` implements it over chromiumoxide
/// (feature `browser`) and [`FakeSession`] implements it for tests.
#[async_trait]
pub trait Session: Send {
    /// Navigate to a URL and wait for the document to load
    async fn navigate(&mut self, url: &str) -> EnsaioResult<()>;

    /// Resolve the locator against the live DOM.
    ///
    /// `Ok(None)` means nothing matched right now — that is a wait condition,
    /// not an error. Errors are reserved for driver-level faults.
    async fn probe(&self, locator: &Locator) -> EnsaioResult<Option<ElementState>>;

    /// Dispatch a click to the first element matching the locator
    async fn click(&mut self, locator: &Locator) -> EnsaioResult<()>;

    /// Move input focus to the first element matching the locator
    async fn focus(&mut self, locator: &Locator) -> EnsaioResult<()>;

    /// Clear any existing value of the first element matching the locator
    async fn clear(&mut self, locator: &Locator) -> EnsaioResult<()>;

    /// Dispatch a single keystroke to the focused element.
    ///
    /// Text injection goes through this one character at a time so that
    /// masked inputs (phone numbers, postal codes) see discrete key events
    /// and their client-side formatting fires.
    async fn press_key(&mut self, ch: char) -> EnsaioResult<()>;

    /// Read the text content of the first element matching the locator
    async fn text_of(&self, locator: &Locator) -> EnsaioResult<Option<String>>;

    /// Capture a PNG screenshot of the current viewport
    async fn screenshot(&self) -> EnsaioResult<Vec<u8>>;

    /// Close the session and release the browser
    async fn close(&mut self) -> EnsaioResult<()>;
}

/// Browser session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl SessionConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Fake session for tests
// ============================================================================

/// A scripted DOM element for [`FakeSession`].
#[derive(Debug, Clone)]
pub struct FakeElement {
    /// Raw selector string this element answers to
    pub selector: String,
    /// Element only reports visible after this much session time has passed
    pub visible_after: Duration,
    /// Whether the element is enabled
    pub enabled: bool,
    /// Text content reported by `text_of`
    pub text: Option<String>,
    /// Element does not exist until this selector has been clicked
    /// (models a popup option behind a disclosure trigger)
    pub revealed_by: Option<String>,
}

impl FakeElement {
    /// Create an element that is present, visible, and enabled from the start
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            visible_after: Duration::ZERO,
            enabled: true,
            text: None,
            revealed_by: None,
        }
    }

    /// Delay visibility by the given duration
    #[must_use]
    pub const fn visible_after(mut self, delay: Duration) -> Self {
        self.visible_after = delay;
        self
    }

    /// Mark the element disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the element's text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Hide the element until another selector has been clicked
    #[must_use]
    pub fn revealed_by(mut self, trigger_selector: impl Into<String>) -> Self {
        self.revealed_by = Some(trigger_selector.into());
        self
    }
}

/// In-memory session double with call recording.
///
/// Elements are scripted up front; interactions are recorded so tests can
/// assert on dispatched clicks, keystroke order, and the close-call count.
#[derive(Debug, Default)]
pub struct FakeSession {
    started: Option<Instant>,
    elements: Vec<FakeElement>,
    /// URLs navigated to, in order
    pub visited: Vec<String>,
    /// Selectors clicked, in order
    pub clicks: Vec<String>,
    /// Keystrokes dispatched, in order
    pub keys: Vec<char>,
    /// Selectors cleared, in order
    pub cleared: Vec<String>,
    /// Number of times `close` was called
    pub close_calls: usize,
    /// Bytes returned from `screenshot`
    pub screenshot_png: Vec<u8>,
    /// Clicking this selector yields a driver fault
    pub fail_click_on: Option<String>,
    /// When set, `screenshot` fails
    pub fail_screenshot: bool,
}

impl FakeSession {
    /// Create an empty fake session
    #[must_use]
    pub fn new() -> Self {
        Self {
            // PNG magic bytes so artifact files look plausible
            screenshot_png: vec![0x89, 0x50, 0x4E, 0x47],
            ..Self::default()
        }
    }

    /// Script an element into the fake DOM
    #[must_use]
    pub fn with_element(mut self, element: FakeElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Make clicks on the given selector fail with a driver fault
    #[must_use]
    pub fn with_click_fault(mut self, selector: impl Into<String>) -> Self {
        self.fail_click_on = Some(selector.into());
        self
    }

    fn elapsed(&self) -> Duration {
        self.started.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn find(&self, locator: &Locator) -> Option<&FakeElement> {
        let element = self.elements.iter().find(|e| e.selector == locator.as_str())?;
        if let Some(ref trigger) = element.revealed_by {
            if !self.clicks.contains(trigger) {
                return None;
            }
        }
        Some(element)
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn navigate(&mut self, url: &str) -> EnsaioResult<()> {
        // The visibility clock starts when the page is first loaded
        self.started.get_or_insert_with(Instant::now);
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> EnsaioResult<Option<ElementState>> {
        Ok(self.find(locator).map(|e| ElementState {
            visible: self.elapsed() >= e.visible_after,
            enabled: e.enabled,
        }))
    }

    async fn click(&mut self, locator: &Locator) -> EnsaioResult<()> {
        if self.fail_click_on.as_deref() == Some(locator.as_str()) {
            return Err(EnsaioError::driver(format!(
                "scripted click fault on {locator}"
            )));
        }
        self.clicks.push(locator.as_str().to_string());
        Ok(())
    }

    async fn focus(&mut self, _locator: &Locator) -> EnsaioResult<()> {
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> EnsaioResult<()> {
        self.cleared.push(locator.as_str().to_string());
        Ok(())
    }

    async fn press_key(&mut self, ch: char) -> EnsaioResult<()> {
        self.keys.push(ch);
        Ok(())
    }

    async fn text_of(&self, locator: &Locator) -> EnsaioResult<Option<String>> {
        Ok(self.find(locator).and_then(|e| e.text.clone()))
    }

    async fn screenshot(&self) -> EnsaioResult<Vec<u8>> {
        if self.fail_screenshot {
            return Err(EnsaioError::Screenshot {
                message: "scripted screenshot fault".into(),
            });
        }
        Ok(self.screenshot_png.clone())
    }

    async fn close(&mut self) -> EnsaioResult<()> {
        self.close_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod element_state_tests {
        use super::*;

        #[test]
        fn test_interactable() {
            assert!(ElementState {
                visible: true,
                enabled: true
            }
            .interactable());
            assert!(!ElementState {
                visible: true,
                enabled: false
            }
            .interactable());
            assert!(!ElementState {
                visible: false,
                enabled: true
            }
            .interactable());
        }
    }

    mod session_config_tests {
        use super::*;

        #[test]
        fn test_config_default() {
            let config = SessionConfig::default();
            assert!(config.headless);
            assert!(config.sandbox);
            assert_eq!(config.viewport_width, 1280);
        }

        #[test]
        fn test_config_builder() {
            let config = SessionConfig::new()
                .with_headless(false)
                .with_viewport(800, 600)
                .with_chromium_path("/usr/bin/chromium")
                .with_no_sandbox();
            assert!(!config.headless);
            assert_eq!(config.viewport_height, 600);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
            assert!(!config.sandbox);
        }
    }

    mod fake_session_tests {
        use super::*;
        use crate::locator::Locator;

        #[tokio::test]
        async fn test_probe_absent_element() {
            let session = FakeSession::new();
            let state = session.probe(&Locator::id("missing")).await.unwrap();
            assert!(state.is_none());
        }

        #[tokio::test]
        async fn test_probe_scripted_element() {
            let mut session =
                FakeSession::new().with_element(FakeElement::new("//*[@id='username']"));
            session.navigate("http://app").await.unwrap();
            let state = session.probe(&Locator::id("username")).await.unwrap();
            assert_eq!(
                state,
                Some(ElementState {
                    visible: true,
                    enabled: true
                })
            );
        }

        #[tokio::test]
        async fn test_delayed_visibility() {
            let mut session = FakeSession::new().with_element(
                FakeElement::new("//*[@id='late']").visible_after(Duration::from_secs(60)),
            );
            session.navigate("http://app").await.unwrap();
            let state = session.probe(&Locator::id("late")).await.unwrap().unwrap();
            assert!(!state.visible);
        }

        #[tokio::test]
        async fn test_revealed_by_gates_on_trigger_click() {
            let trigger = Locator::css("#trigger");
            let option = Locator::css("#option");
            let mut session = FakeSession::new()
                .with_element(FakeElement::new("#trigger"))
                .with_element(FakeElement::new("#option").revealed_by("#trigger"));

            assert!(session.probe(&option).await.unwrap().is_none());
            session.click(&trigger).await.unwrap();
            assert!(session.probe(&option).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_click_fault() {
            let mut session = FakeSession::new().with_click_fault("#broken");
            let err = session.click(&Locator::css("#broken")).await.unwrap_err();
            assert!(matches!(err, EnsaioError::Driver { .. }));
        }

        #[tokio::test]
        async fn test_keystrokes_recorded_in_order() {
            let mut session = FakeSession::new();
            for ch in "12345".chars() {
                session.press_key(ch).await.unwrap();
            }
            assert_eq!(session.keys.iter().collect::<String>(), "12345");
        }

        #[tokio::test]
        async fn test_close_counts() {
            let mut session = FakeSession::new();
            session.close().await.unwrap();
            session.close().await.unwrap();
            assert_eq!(session.close_calls, 2);
        }
    }
}
